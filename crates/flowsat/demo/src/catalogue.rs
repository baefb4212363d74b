//! Image-processing tool catalogue used by the demo.
//!
//! Two data dimensions: `format` (how the bytes are laid out) and `content`
//! (what the picture shows). Tools only care about formats, except the
//! classifier which turns an unknown picture into a labelled photo.

use flowsat_taxonomy::{Domain, TaxonomyResult};

pub const TOOL_ROOT: &str = "operations";
pub const DATA_ROOT: &str = "data";

pub fn image_catalogue() -> TaxonomyResult<Domain> {
    let mut domain = Domain::new(TOOL_ROOT, DATA_ROOT, ["format", "content"]);

    domain.add_abstract_type("raster", "format")?;
    domain.add_simple_type("png", "raster")?;
    domain.add_simple_type("jpeg", "raster")?;
    domain.add_simple_type("tiff", "raster")?;
    domain.add_simple_type("svg", "format")?;
    domain.add_simple_type("picture", "content")?;
    domain.add_simple_type("photo", "content")?;
    domain.add_simple_type("diagram", "content")?;

    domain.add_abstract_module("conversion", TOOL_ROOT)?;
    domain.add_abstract_module("analysis", TOOL_ROOT)?;
    domain.add_abstract_module("rendering", TOOL_ROOT)?;

    domain.add_tool("tiff_to_png", &["conversion"], &["tiff"], &["png"])?;
    domain.add_tool("png_to_jpeg", &["conversion"], &["png"], &["jpeg"])?;
    domain.add_tool("jpeg_to_png", &["conversion"], &["jpeg"], &["png"])?;
    domain.add_tool("classify", &["analysis"], &["picture"], &["photo"])?;
    domain.add_tool("trace", &["rendering", "conversion"], &["png"], &["svg"])?;
    domain.add_tool("rasterize", &["rendering"], &["svg"], &["png"])?;

    Ok(domain)
}
