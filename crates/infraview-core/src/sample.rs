//! The "Cloud Multi-Region" sample infrastructure used by demos and benches.

use crate::{InfraNode, Infrastructure, Status};

/// Workload count of the large pool in the default sample.
pub const DEFAULT_LARGE_POOL_SIZE: usize = 100_000;

/// Status of the `i`-th generated workload: 70% healthy, 20% warning, 10% error,
/// cycling every ten workloads so datasets are reproducible.
pub fn generated_status(i: usize) -> Status {
    match i % 10 {
        0..=6 => Status::Healthy,
        7 | 8 => Status::Warning,
        _ => Status::Error,
    }
}

/// `count` generated workloads for `pool_id`, 1-based like their labels.
pub fn generated_workloads(pool_id: &str, count: usize) -> Vec<InfraNode> {
    (1..=count)
        .map(|i| {
            InfraNode::workload(
                format!("{pool_id}-w{i}"),
                format!("workload-{i}"),
                Some(generated_status(i - 1)),
            )
        })
        .collect()
}

fn workload(id: &str, label: &str, status: Status) -> InfraNode {
    InfraNode::workload(id, label, Some(status))
}

/// Two environments; the us-east web tier holds `large_pool_size` workloads.
pub fn cloud_multi_region(large_pool_size: usize) -> Infrastructure {
    let us_east = InfraNode::environment(
        "us-east",
        "us-east-1.aws.com",
        vec![
            InfraNode::server_pool(
                "us-east-pool-1",
                "Web Tier Pool",
                generated_workloads("us-east-pool-1", large_pool_size),
            ),
            InfraNode::server_pool(
                "us-east-pool-2",
                "API Gateway Pool",
                vec![
                    workload("us-east-pool-2-w1", "aws-api-gateway-1", Status::Healthy),
                    workload("us-east-pool-2-w2", "aws-api-gateway-2", Status::Healthy),
                    workload("us-east-pool-2-w3", "aws-kong-gateway-1", Status::Warning),
                ],
            ),
            InfraNode::server_pool(
                "us-east-pool-3",
                "Database Pool",
                vec![
                    workload("us-east-pool-3-w1", "aws-postgres-primary", Status::Healthy),
                    workload("us-east-pool-3-w2", "aws-postgres-replica-1", Status::Healthy),
                    workload("us-east-pool-3-w3", "aws-redis-cache", Status::Error),
                ],
            ),
        ],
    )
    .with_metadata("provider", serde_json::json!("aws"));

    let eu_west = InfraNode::environment(
        "eu-west",
        "eu-west-1.aws.com",
        vec![
            InfraNode::server_pool(
                "eu-west-pool-1",
                "Web Tier Pool",
                vec![
                    workload("eu-west-pool-1-w1", "aws-nginx-frontend-1", Status::Healthy),
                    workload("eu-west-pool-1-w2", "aws-nginx-frontend-2", Status::Healthy),
                ],
            ),
            InfraNode::server_pool(
                "eu-west-pool-2",
                "Database Pool",
                vec![
                    workload("eu-west-pool-2-w1", "aws-postgres-replica-2", Status::Healthy),
                    workload("eu-west-pool-2-w2", "aws-redis-cache", Status::Warning),
                ],
            ),
        ],
    )
    .with_metadata("provider", serde_json::json!("aws"));

    Infrastructure::new(
        "Cloud Multi-Region",
        "AWS-based multi-region infrastructure",
        vec![us_east, eu_west],
    )
}
