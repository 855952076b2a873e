/*!

`subnet-checker` inspects the EC2 subnets visible to the caller's credentials,
checks each tagged subnet for the Kubernetes cluster ownership and ELB role
tags that load balancer placement requires, and writes the discovered subnet
ids to a one-page PDF report.

!*/

use serde::Serialize;

pub mod aws;
pub mod error;
pub mod report;
pub mod tags;

/// Print a value using `serde_json` `to_string_pretty` for types that implement Serialize.
pub fn json_display<T: Serialize>(object: T) -> String {
    serde_json::to_string_pretty(&object).unwrap_or_else(|e| format!("Serialization failed: {}", e))
}
