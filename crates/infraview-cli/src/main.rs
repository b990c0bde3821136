use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use infraview_app::project::load_infrastructure;
use infraview_app::{InfraProject, ViewController};
use infraview_core::NodeId;
use infraview_core::sample::{DEFAULT_LARGE_POOL_SIZE, cloud_multi_region};
use infraview_events::{ActivationOrigin, Event, EventBus};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod text;

use text::TextRenderer;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Project file holding view settings and the infrastructure
    #[arg(short, long, global = true, conflicts_with = "model")]
    project: Option<PathBuf>,

    /// Bare infrastructure JSON file
    #[arg(short, long, global = true)]
    model: Option<PathBuf>,

    /// Workload count of the generated sample's large pool, used when no file is given
    #[arg(short, long, global = true, default_value_t = DEFAULT_LARGE_POOL_SIZE)]
    sample: usize,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the visible window of the flattened tree
    Tree {
        /// Apply a search term
        #[arg(long)]
        search: Option<String>,
        /// Start with every node collapsed
        #[arg(long)]
        collapsed: bool,
        /// Pools to press "Load More" on (repeatable)
        #[arg(long = "load-more")]
        load_more: Vec<String>,
        /// Pools to press "Load All" on (repeatable)
        #[arg(long = "load-all")]
        load_all: Vec<String>,
        /// Viewport height in pixels
        #[arg(long, default_value_t = 600.0)]
        height: f32,
        /// Scroll offset in pixels
        #[arg(long, default_value_t = 0.0)]
        scroll: f32,
    },
    /// Print the topology projection of an environment
    Topology {
        /// Environment to project; defaults to the first one
        #[arg(long)]
        env: Option<String>,
        #[arg(long)]
        search: Option<String>,
    },
    /// Activate a node and report what both views highlight
    Select {
        id: String,
        #[arg(long, value_enum, default_value_t = Origin::Tree)]
        origin: Origin,
    },
    /// Write the loaded infrastructure and settings as a project file
    Export { out: PathBuf },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Origin {
    Tree,
    Topology,
}

impl From<Origin> for ActivationOrigin {
    fn from(origin: Origin) -> Self {
        match origin {
            Origin::Tree => ActivationOrigin::Tree,
            Origin::Topology => ActivationOrigin::Topology,
        }
    }
}

fn load(args: &Args) -> Result<InfraProject> {
    if let Some(path) = &args.project {
        return InfraProject::load(path)
            .with_context(|| format!("Failed to open project {}", path.display()));
    }
    if let Some(path) = &args.model {
        return Ok(InfraProject::new(load_infrastructure(path)?));
    }
    Ok(InfraProject::new(cloud_multi_region(args.sample)))
}

fn apply_search(bus: &EventBus, view: &mut ViewController, search: Option<&str>) {
    if let Some(text) = search {
        bus.publish(Event::SearchInput {
            text: text.to_string(),
        });
        bus.dispatch_to(view);
        view.commit_search();
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let project = load(&args)?;
    if let Command::Export { out } = &args.command {
        project.save(out)?;
        println!("Wrote {}", out.display());
        return Ok(());
    }

    let InfraProject {
        settings,
        infrastructure,
    } = project;
    let mut view =
        ViewController::new(infrastructure, settings).context("Infrastructure model is malformed")?;
    let bus = EventBus::new();
    let mut renderer = TextRenderer::default();

    match &args.command {
        Command::Tree {
            search,
            collapsed,
            load_more,
            load_all,
            height,
            scroll,
        } => {
            if *collapsed {
                bus.publish(Event::CollapseAll);
            }
            for pool in load_more {
                bus.publish(Event::LoadMore {
                    pool_id: NodeId::from(pool.as_str()),
                });
            }
            for pool in load_all {
                bus.publish(Event::LoadAll {
                    pool_id: NodeId::from(pool.as_str()),
                });
            }
            bus.publish(Event::ViewportResize {
                width: 0.0,
                height: *height,
            });
            bus.dispatch_to(&mut view);
            apply_search(&bus, &mut view, search.as_deref());
            bus.publish(Event::Scroll { offset: *scroll });
            bus.dispatch_to(&mut view);

            if args.json {
                let total = view.rows().len();
                let window = view.viewport().window(total);
                let rows = &view.rows()[window.range()];
                println!("{}", serde_json::to_string_pretty(rows)?);
            } else {
                view.render(&mut renderer);
                print!("{}", renderer.tree);
            }
        }
        Command::Topology { env, search } => {
            if let Some(env) = env {
                if view.infrastructure().environment(env).is_none() {
                    bail!("No environment named {env}");
                }
                view.select(NodeId::from(env.as_str()));
            }
            apply_search(&bus, &mut view, search.as_deref());

            let Some(topology) = view.topology() else {
                bail!("The model has no environments");
            };
            if args.json {
                println!("{}", topology.to_json_pretty()?);
            } else {
                view.render(&mut renderer);
                print!("{}", renderer.topology);
            }
        }
        Command::Select { id, origin } => {
            bus.publish(Event::NodeActivate {
                id: id.clone(),
                origin: (*origin).into(),
            });
            bus.dispatch_to(&mut view);

            let report = serde_json::json!({
                "selected": view.selected(),
                "activeEnvironment": view.active_environment(),
                "highlightedTopologyId": view.highlighted_topology_id(),
                "selectedRowId": view.selected_row_id(),
                "selectedRowIndex": view.selected_row_index(),
                "focusedPool": view.focused_pool(),
                "details": view.details(),
            });
            if args.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                view.render(&mut renderer);
                print!("{}", renderer.tree);
                print!("{}", renderer.topology);
                println!("{report:#}");
            }
        }
        Command::Export { .. } => {}
    }

    for notification in view.notifications().drain() {
        tracing::debug!("{:?}", notification);
    }
    Ok(())
}
