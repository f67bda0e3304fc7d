use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use crate::bucket::Bucket;
use crate::template::Template;
use crate::{Error, Result};

/// Renders `template_path` with `bucket` and writes the result to
/// `output_path`, creating or truncating it.
///
/// The template is parsed and rendered in memory first, so a bad template
/// leaves an existing manifest untouched.
pub fn write_manifest(template_path: &Path, output_path: &Path, bucket: &Bucket) -> Result<()> {
    let template_error = |source| Error::Template {
        path: template_path.to_path_buf(),
        source,
    };
    let template = Template::from_file(template_path).map_err(template_error)?;
    tracing::debug!(
        "template {} uses fields {:?}",
        template_path.display(),
        template.fields().collect::<Vec<_>>()
    );
    let rendered = template.render(&bucket.context()).map_err(template_error)?;

    let io_error = |source| Error::Io {
        path: output_path.to_path_buf(),
        source,
    };
    let mut file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(output_path)
        .map_err(io_error)?;
    file.write_all(rendered.as_bytes()).map_err(io_error)?;
    file.flush().map_err(io_error)?;

    tracing::info!(
        "wrote {} ({} bytes) for version {}",
        output_path.display(),
        rendered.len(),
        bucket.version
    );
    Ok(())
}
