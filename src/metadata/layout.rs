//! MAME `.lay` layout descriptors.
//!
//! Fixed schema: one `bezel` element backed by the source image, one
//! "Upright Artwork" view placing screen 0 at the detected region and the
//! bezel over the full image.
use super::MetadataError;
use crate::region::ConnectedRegion;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::fs;
use std::io::Cursor;
use std::path::Path;

pub const LAYOUT_EXTENSION: &str = "lay";
pub const VIEW_NAME: &str = "Upright Artwork";

/// Render the layout document for `image_file` (a file name, not a path).
pub fn render_layout(
    layout_name: &str,
    image_file: &str,
    region: &ConnectedRegion,
    bezel_width: usize,
    bezel_height: usize,
) -> Result<String, MetadataError> {
    let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b'\t', 1);

    writer.write_event(Event::Decl(BytesDecl::new("1.0", None, None)))?;
    let comment = format!(" {} ", layout_name.replace("--", "-"));
    writer.write_event(Event::Comment(BytesText::from_escaped(comment)))?;

    writer.write_event(Event::Start(
        BytesStart::new("mamelayout").with_attributes([("version", "2")]),
    ))?;

    writer.write_event(Event::Start(
        BytesStart::new("element").with_attributes([("name", "bezel")]),
    ))?;
    writer.write_event(Event::Empty(
        BytesStart::new("image").with_attributes([("file", image_file)]),
    ))?;
    writer.write_event(Event::End(BytesEnd::new("element")))?;

    writer.write_event(Event::Start(
        BytesStart::new("view").with_attributes([("name", VIEW_NAME)]),
    ))?;
    writer.write_event(Event::Start(
        BytesStart::new("screen").with_attributes([("index", "0")]),
    ))?;
    write_bounds(&mut writer, region.left, region.top, region.width, region.height)?;
    writer.write_event(Event::End(BytesEnd::new("screen")))?;
    writer.write_event(Event::Start(
        BytesStart::new("element").with_attributes([("ref", "bezel")]),
    ))?;
    write_bounds(&mut writer, 0, 0, bezel_width, bezel_height)?;
    writer.write_event(Event::End(BytesEnd::new("element")))?;
    writer.write_event(Event::End(BytesEnd::new("view")))?;

    writer.write_event(Event::End(BytesEnd::new("mamelayout")))?;

    let mut text = String::from_utf8_lossy(&writer.into_inner().into_inner()).into_owned();
    text.push('\n');
    Ok(text)
}

fn write_bounds(
    writer: &mut Writer<Cursor<Vec<u8>>>,
    x: usize,
    y: usize,
    width: usize,
    height: usize,
) -> Result<(), quick_xml::Error> {
    let (x, y, width, height) = (
        x.to_string(),
        y.to_string(),
        width.to_string(),
        height.to_string(),
    );
    writer.write_event(Event::Empty(BytesStart::new("bounds").with_attributes([
        ("x", x.as_str()),
        ("y", y.as_str()),
        ("width", width.as_str()),
        ("height", height.as_str()),
    ])))
}

pub fn write_layout(path: &Path, text: &str) -> Result<(), MetadataError> {
    fs::write(path, text).map_err(|source| MetadataError::Io {
        path: path.to_path_buf(),
        source,
    })
}
