use aws_sdk_ec2::error::DescribeSubnetsError;
use aws_sdk_ec2::types::SdkError;
use snafu::Snafu;
use std::path::PathBuf;

/// The crate-wide result type.
pub type Result<T> = std::result::Result<T, Error>;

/// The crate-wide error type.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    #[snafu(display("EC2 call failed while {}: {}", what, source))]
    ProviderUnavailable {
        what: String,
        source: SdkError<DescribeSubnetsError>,
    },

    #[snafu(display("EC2 response was missing {}", what))]
    MalformedResponse { what: String },

    #[snafu(display("Invalid input: {}", what))]
    InvalidInput { what: String },

    #[snafu(display("Unable to create report file '{}': {}", path.display(), source))]
    ReportFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[snafu(display("Unable to render report: {}", message))]
    ReportRender { message: String },
}
