//! Shared domains for the flowsat integration and property suites.

use flowsat_taxonomy::{Domain, NodeId, TaxonomyResult};

/// Root of the tool taxonomy in every fixture
pub const TOOLS: &str = "tools";

/// Root of the data taxonomy in every fixture
pub const DATA: &str = "data";

/// Tools `a` and `b`, neither consuming nor producing data, and one simple
/// type `d1`.
pub fn two_tool_domain() -> TaxonomyResult<Domain> {
    let mut domain = Domain::new(TOOLS, DATA, Vec::<NodeId>::new());
    domain.add_simple_type("d1", DATA)?;
    domain.add_tool("a", &[TOOLS], &[], &[])?;
    domain.add_tool("b", &[TOOLS], &[], &[])?;
    Ok(domain)
}

/// `produce` emits `a`, `spacer` emits `b`, `consume` turns `a` into `c`.
///
/// With `produce` first, `spacer` second and `consume` last the pipeline
/// discipline has no way to route `a` to `consume`, while shared memory
/// does.
pub fn relay_domain() -> TaxonomyResult<Domain> {
    let mut domain = Domain::new(TOOLS, DATA, Vec::<NodeId>::new());
    for t in ["a", "b", "c"] {
        domain.add_simple_type(t, DATA)?;
    }
    domain.add_tool("produce", &[TOOLS], &[], &["a"])?;
    domain.add_tool("spacer", &[TOOLS], &[], &["b"])?;
    domain.add_tool("consume", &[TOOLS], &["a"], &["c"])?;
    Ok(domain)
}

/// `count` data-free tools named `t0`, `t1`, ...; the first `grouped` of
/// them sit below an abstract `group` operation, the rest below the root.
pub fn flat_domain(count: usize, grouped: usize) -> TaxonomyResult<Domain> {
    let mut domain = Domain::new(TOOLS, DATA, Vec::<NodeId>::new());
    domain.add_simple_type("d1", DATA)?;
    domain.add_abstract_module("group", TOOLS)?;
    for i in 0..count {
        let parent = if i < grouped { "group" } else { TOOLS };
        domain.add_tool(format!("t{}", i), &[parent], &[], &[])?;
    }
    Ok(domain)
}

/// Image processing with a `format` and a `content` dimension.
pub fn image_domain() -> TaxonomyResult<Domain> {
    let mut domain = Domain::new(TOOLS, DATA, ["format", "content"]);
    domain.add_abstract_type("raster", "format")?;
    domain.add_simple_type("png", "raster")?;
    domain.add_simple_type("jpeg", "raster")?;
    domain.add_simple_type("svg", "format")?;
    domain.add_simple_type("photo", "content")?;
    domain.add_simple_type("chart", "content")?;

    domain.add_abstract_module("convert", TOOLS)?;
    domain.add_abstract_module("render", TOOLS)?;
    domain.add_tool("png_to_jpeg", &["convert"], &["png"], &["jpeg"])?;
    domain.add_tool("jpeg_to_png", &["convert"], &["jpeg"], &["png"])?;
    domain.add_tool("rasterize", &["render"], &["svg"], &["png"])?;
    domain.add_tool("plot", &["render"], &[], &["svg"])?;
    Ok(domain)
}
