//! # Variant Descriptions
//!
//! Parses the build system's variants XML into typed [`Variant`] records. A
//! variant is a named subset of the distribution that maps one-to-one onto a
//! repository:
//!
//! ```xml
//! <variants>
//!   <variant id="AppStream" name="AppStream" type="variant">
//!     <arches><arch>x86_64</arch><arch>aarch64</arch></arches>
//!     <groups><group default="true">core</group></groups>
//!     <environments><environment>server-product-environment</environment></environments>
//!     <modules><module>httpd:2.4</module></modules>
//!   </variant>
//! </variants>
//! ```
//!
//! Only the direct `variant` children of the document element are read;
//! nested layered variants are ignored. Module entries are kept verbatim here
//! and validated by the membership phase.

use indexmap::IndexMap;
use std::path::Path;
use xot::{NameId, Node, Xot};

use crate::error::{Error, Result};

/// One `variant` element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Variant {
    /// Variant identifier, which is also the repository name.
    pub id: String,
    pub arches: Vec<String>,
    pub groups: Vec<String>,
    pub environments: Vec<String>,
    /// Raw `name:stream` module declarations.
    pub modules: Vec<String>,
}

/// Repository -> raw module declarations, in document order.
pub fn module_declarations(variants: &[Variant]) -> IndexMap<String, Vec<String>> {
    let mut declarations: IndexMap<String, Vec<String>> = IndexMap::new();
    for variant in variants.iter().filter(|v| !v.modules.is_empty()) {
        declarations
            .entry(variant.id.clone())
            .or_default()
            .extend(variant.modules.iter().cloned());
    }
    declarations
}

struct Names {
    variant: NameId,
    id: NameId,
    arches: NameId,
    arch: NameId,
    groups: NameId,
    group: NameId,
    environments: NameId,
    environment: NameId,
    modules: NameId,
    module: NameId,
}

impl Names {
    fn new(xot: &mut Xot) -> Self {
        Self {
            variant: xot.add_name("variant"),
            id: xot.add_name("id"),
            arches: xot.add_name("arches"),
            arch: xot.add_name("arch"),
            groups: xot.add_name("groups"),
            group: xot.add_name("group"),
            environments: xot.add_name("environments"),
            environment: xot.add_name("environment"),
            modules: xot.add_name("modules"),
            module: xot.add_name("module"),
        }
    }
}

/// Parse a variants XML document. `origin` names the input in error messages.
pub fn parse(content: &str, origin: &str) -> Result<Vec<Variant>> {
    let parse_error = |message: String| Error::VariantParse {
        path: origin.to_string(),
        message,
    };

    let mut xot = Xot::new();
    let names = Names::new(&mut xot);
    let root = xot.parse(content).map_err(|e| parse_error(e.to_string()))?;
    let document = xot
        .document_element(root)
        .map_err(|e| parse_error(e.to_string()))?;

    let mut variants = Vec::new();
    for node in child_elements(&xot, document, names.variant) {
        let id = xot
            .get_attribute(node, names.id)
            .map(str::to_string)
            .ok_or_else(|| parse_error("variant element without an 'id' attribute".to_string()))?;
        variants.push(Variant {
            arches: list_texts(&xot, node, names.arches, names.arch),
            groups: list_texts(&xot, node, names.groups, names.group),
            environments: list_texts(&xot, node, names.environments, names.environment),
            modules: list_texts(&xot, node, names.modules, names.module),
            id,
        });
    }
    Ok(variants)
}

/// Read and parse a variants XML file.
pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Vec<Variant>> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| Error::VariantParse {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    parse(&content, &path.display().to_string())
}

fn child_elements(xot: &Xot, parent: Node, name: NameId) -> Vec<Node> {
    xot.children(parent)
        .filter(|child| {
            xot.element(*child)
                .is_some_and(|element| element.name() == name)
        })
        .collect()
}

/// Trimmed, non-empty text of every `item` element under every `container`
/// child of `parent`.
fn list_texts(xot: &Xot, parent: Node, container: NameId, item: NameId) -> Vec<String> {
    child_elements(xot, parent, container)
        .into_iter()
        .flat_map(|list| child_elements(xot, list, item))
        .map(|node| text_of(xot, node))
        .filter(|text| !text.is_empty())
        .collect()
}

fn text_of(xot: &Xot, node: Node) -> String {
    let text: String = xot
        .children(node)
        .filter_map(|child| xot.text_str(child))
        .collect();
    text.trim().to_string()
}
