//! Plain-text PPM (P3) output.

use crate::{Image, RenderResult};
use std::io::Write;

/// Write an image as ASCII PPM.
///
/// Emits the `P3` header, then one `r g b` line per pixel in row-major
/// order starting at the top-left.
pub fn write_ppm<W: Write>(mut writer: W, image: &Image) -> RenderResult<()> {
    writeln!(writer, "P3")?;
    writeln!(writer, "{} {}", image.width, image.height)?;
    writeln!(writer, "255")?;

    for y in 0..image.height {
        for x in 0..image.width {
            let [r, g, b] = image.rgb8(x, y);
            writeln!(writer, "{} {} {}", r, g, b)?;
        }
    }

    writer.flush()?;
    Ok(())
}
