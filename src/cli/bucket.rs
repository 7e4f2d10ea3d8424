//! Handler for the `bucket` command.

use crate::cli::{BucketArgs, BucketKind};
use crate::domain::{cpm_bucket, load_time_bucket};

/// Label for the measurement, if it falls in a bucket.
#[must_use]
pub fn label(args: &BucketArgs) -> Option<&'static str> {
    match args.kind {
        BucketKind::Time => load_time_bucket(args.value).map(|b| b.label()),
        BucketKind::Cpm => cpm_bucket(args.value).map(|b| b.label()),
    }
}

/// Execute `bucket`.
pub fn execute(args: &BucketArgs) {
    match label(args) {
        Some(label) => println!("{label}"),
        None => println!("(no bucket)"),
    }
}
