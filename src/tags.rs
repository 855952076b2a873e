use crate::aws;
use crate::error::{self, Result};
use aws_sdk_ec2::model::Tag;
use aws_sdk_ec2::Client;
use log::info;
use snafu::ensure;
use std::fmt;

/// Tag key prefix marking a subnet as belonging to a cluster.
pub const CLUSTER_TAG_PREFIX: &str = "kubernetes.io/cluster/";
/// Tag marking a subnet as eligible for public load balancers.
pub const ELB_ROLE_TAG: &str = "kubernetes.io/role/elb";
/// Tag marking a subnet as eligible for internal load balancers.
pub const INTERNAL_ELB_ROLE_TAG: &str = "kubernetes.io/role/internal-elb";
/// Expected alongside the cluster ownership tag.
const SHARED_VALUE: &str = "shared";
/// Expected alongside an ELB role tag.
const ELB_ROLE_VALUE: &str = "1";

/// The ownership tag expected on subnets belonging to `cluster_name`.
pub fn cluster_tag(cluster_name: &str) -> String {
    format!("{}{}", CLUSTER_TAG_PREFIX, cluster_name)
}

/// A remediation message for a subnet whose tags are missing or incomplete.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Finding {
    /// The cluster ownership tag is absent, or present without `shared`.
    ClusterTagNotShared {
        subnet_id: String,
        cluster_name: String,
    },
    /// An ELB role tag is present but its companion `1` is not.
    ElbRoleValueMissing { subnet_id: String },
    /// Neither ELB role tag is present.
    ElbRoleTagMissing { subnet_id: String },
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Finding::ClusterTagNotShared {
                subnet_id,
                cluster_name,
            } => write!(
                f,
                "Add {} shared tag in subnet {}",
                cluster_tag(cluster_name),
                subnet_id
            ),
            Finding::ElbRoleValueMissing { subnet_id } => write!(
                f,
                "Add 'For private subnets- {} -> 1' or 'For public subnets- {} -> 1' tag in the subnet {}",
                INTERNAL_ELB_ROLE_TAG, ELB_ROLE_TAG, subnet_id
            ),
            Finding::ElbRoleTagMissing { subnet_id } => write!(
                f,
                "Add '{} -> 1' tag for private subnets or '{} -> 1' tag for public subnets: {}",
                INTERNAL_ELB_ROLE_TAG, ELB_ROLE_TAG, subnet_id
            ),
        }
    }
}

/// True when `expected` appears in the tag pair's value set, meaning its key
/// or its value.
fn tag_contains(tag: &Tag, expected: &str) -> bool {
    tag.key() == Some(expected) || tag.value() == Some(expected)
}

/// Evaluate one subnet's tags against the cluster ownership and ELB role
/// expectations.
///
/// A subnet with an absent or empty tag collection yields no findings.
/// Matching is by value-set membership over each tag pair: the expected
/// string may appear as either the key or the value, and the companion value
/// (`shared` or `1`) is looked up in the same pair.
pub fn evaluate_subnet_tags(
    cluster_name: &str,
    subnet_id: &str,
    tags: Option<&[Tag]>,
) -> Vec<Finding> {
    let mut findings = Vec::new();
    let tags = match tags {
        Some(tags) if !tags.is_empty() => tags,
        _ => return findings,
    };
    let expected_cluster_tag = cluster_tag(cluster_name);
    let mut has_cluster_tag = false;
    let mut has_elb_role = false;
    for tag in tags {
        if tag_contains(tag, &expected_cluster_tag) {
            has_cluster_tag = true;
            if !tag_contains(tag, SHARED_VALUE) {
                findings.push(Finding::ClusterTagNotShared {
                    subnet_id: subnet_id.to_string(),
                    cluster_name: cluster_name.to_string(),
                });
            }
        }
        if tag_contains(tag, ELB_ROLE_TAG) || tag_contains(tag, INTERNAL_ELB_ROLE_TAG) {
            has_elb_role = true;
            if !tag_contains(tag, ELB_ROLE_VALUE) {
                findings.push(Finding::ElbRoleValueMissing {
                    subnet_id: subnet_id.to_string(),
                });
            }
        }
    }
    if !has_elb_role {
        findings.push(Finding::ElbRoleTagMissing {
            subnet_id: subnet_id.to_string(),
        });
    }
    if !has_cluster_tag {
        findings.push(Finding::ClusterTagNotShared {
            subnet_id: subnet_id.to_string(),
            cluster_name: cluster_name.to_string(),
        });
    }
    findings
}

/// Fetch the tags for each subnet and print a remediation message for every
/// missing or incomplete tag expectation.
pub async fn check_cluster_tags(
    client: &Client,
    cluster_name: &str,
    subnet_ids: &[String],
) -> Result<()> {
    ensure!(
        !cluster_name.is_empty(),
        error::InvalidInputSnafu {
            what: "cluster name must not be empty"
        }
    );
    info!(
        "Checking {} subnets for cluster '{}' tags",
        subnet_ids.len(),
        cluster_name
    );
    for subnet_id in subnet_ids {
        let tags = aws::subnet_tags(client, subnet_id).await?;
        for finding in evaluate_subnet_tags(cluster_name, subnet_id, tags.as_deref()) {
            println!("{}", finding);
        }
    }
    Ok(())
}

#[cfg(test)]
fn test_tag(key: &str, value: &str) -> Tag {
    Tag::builder().key(key).value(value).build()
}

#[test]
fn untagged_subnet_is_skipped() {
    assert!(evaluate_subnet_tags("prod", "subnet-1", None).is_empty());
    assert!(evaluate_subnet_tags("prod", "subnet-1", Some(&[])).is_empty());
}

#[test]
fn shared_cluster_tag_is_compliant() {
    let tags = vec![
        test_tag("kubernetes.io/cluster/prod", "shared"),
        test_tag("kubernetes.io/role/elb", "1"),
    ];
    assert!(evaluate_subnet_tags("prod", "subnet-1", Some(&tags)).is_empty());
}

#[test]
fn missing_both_indicators_flags_each_once() {
    let tags = vec![test_tag("Name", "my-subnet")];
    let findings = evaluate_subnet_tags("prod", "subnet-1", Some(&tags));
    assert_eq!(
        findings,
        vec![
            Finding::ElbRoleTagMissing {
                subnet_id: "subnet-1".to_string()
            },
            Finding::ClusterTagNotShared {
                subnet_id: "subnet-1".to_string(),
                cluster_name: "prod".to_string()
            },
        ]
    );
}

#[test]
fn cluster_string_in_value_position_matches() {
    let tags = vec![
        test_tag("Purpose", "kubernetes.io/cluster/prod"),
        test_tag("kubernetes.io/role/internal-elb", "1"),
    ];
    let findings = evaluate_subnet_tags("prod", "subnet-9", Some(&tags));
    assert_eq!(
        findings,
        vec![Finding::ClusterTagNotShared {
            subnet_id: "subnet-9".to_string(),
            cluster_name: "prod".to_string()
        }]
    );
}

#[test]
fn elb_role_without_companion_value_is_flagged() {
    let tags = vec![
        test_tag("kubernetes.io/cluster/prod", "shared"),
        test_tag("kubernetes.io/role/elb", "enabled"),
    ];
    let findings = evaluate_subnet_tags("prod", "subnet-2", Some(&tags));
    assert_eq!(
        findings,
        vec![Finding::ElbRoleValueMissing {
            subnet_id: "subnet-2".to_string()
        }]
    );
}

#[test]
fn remediation_messages_name_the_subnet() {
    let finding = Finding::ClusterTagNotShared {
        subnet_id: "subnet-3".to_string(),
        cluster_name: "prod".to_string(),
    };
    assert_eq!(
        finding.to_string(),
        "Add kubernetes.io/cluster/prod shared tag in subnet subnet-3"
    );
    let finding = Finding::ElbRoleTagMissing {
        subnet_id: "subnet-3".to_string(),
    };
    assert_eq!(
        finding.to_string(),
        "Add 'kubernetes.io/role/internal-elb -> 1' tag for private subnets or \
         'kubernetes.io/role/elb -> 1' tag for public subnets: subnet-3"
    );
}
