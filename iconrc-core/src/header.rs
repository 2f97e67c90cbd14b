//! C++ header with one resource path constant per icon.
use crate::{
    config::{self, CollisionPolicy, Config},
    icon::IconEntry,
    identifier, output, Error, Stage,
};
use std::{
    collections::{BTreeMap, BTreeSet},
    fmt::{self, Display},
    path::Path,
};

/// Icons grouped by category, each as a sorted set of (file stem, alias).
pub type CategoryGroups<'a> = BTreeMap<&'a str, BTreeSet<(&'a str, &'a str)>>;

pub fn group_by_category<'a>(
    icons: &'a [IconEntry],
    default_category: &'a str,
) -> CategoryGroups<'a> {
    let mut groups = CategoryGroups::new();
    for icon in icons {
        groups
            .entry(icon.category(default_category))
            .or_default()
            .insert((icon.file_stem(), icon.alias()));
    }
    groups
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Constant {
    pub identifier: String,
    pub alias: String,
}

/// One `namespace` block of constants.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct ConstantBlock {
    pub namespace: String,
    pub constants: Vec<Constant>,
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct HeaderDocument {
    pub namespace: String,
    pub include: String,
    pub string_type: String,
    pub prefix: String,
    pub blocks: Vec<ConstantBlock>,
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub enum HeaderWarning {
    /// Nothing of the icon's name survived sanitizing; no constant was emitted.
    EmptyIdentifier { alias: String },
    /// The derived name was taken by another icon in the same namespace.
    Renamed {
        alias: String,
        from: String,
        to: String,
    },
}

impl Display for HeaderWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeaderWarning::EmptyIdentifier { alias } => {
                write!(f, "skipped '{}': no valid identifier can be derived", alias)
            }
            HeaderWarning::Renamed { alias, from, to } => {
                write!(f, "renamed constant for '{}' from {} to {}", alias, from, to)
            }
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Default)]
pub struct HeaderReport {
    pub constants: usize,
    pub warnings: Vec<HeaderWarning>,
}

fn sort_constants(constants: &mut [Constant]) {
    constants.sort_by(|a, b| {
        a.identifier
            .cmp(&b.identifier)
            .then_with(|| a.alias.cmp(&b.alias))
    });
}

fn resolve_collisions(
    namespace: &str,
    mut constants: Vec<Constant>,
    policy: CollisionPolicy,
    warnings: &mut Vec<HeaderWarning>,
) -> Result<Vec<Constant>, Error> {
    sort_constants(&mut constants);
    let mut taken = constants
        .iter()
        .map(|c| c.identifier.clone())
        .collect::<BTreeSet<_>>();
    let mut first_alias = BTreeMap::<String, String>::new();
    let mut renamed_any = false;

    for constant in &mut constants {
        let Some(first) = first_alias.get(&constant.identifier) else {
            first_alias.insert(constant.identifier.clone(), constant.alias.clone());
            continue;
        };
        match policy {
            CollisionPolicy::Error => {
                return Err(Error::IdentifierCollision {
                    namespace: namespace.to_owned(),
                    identifier: constant.identifier.clone(),
                    first: first.clone(),
                    second: constant.alias.clone(),
                })
            }
            CollisionPolicy::Suffix => {
                let renamed = (2..)
                    .map(|n| format!("{}_{}", constant.identifier, n))
                    .find(|candidate| !taken.contains(candidate))
                    .unwrap_or_default();
                taken.insert(renamed.clone());
                warnings.push(HeaderWarning::Renamed {
                    alias: constant.alias.clone(),
                    from: std::mem::replace(&mut constant.identifier, renamed.clone()),
                    to: renamed,
                });
                renamed_any = true;
            }
        }
    }

    if renamed_any {
        sort_constants(&mut constants);
    }
    Ok(constants)
}

/// Derives all constants for `icons`.
///
/// Categories whose names map to the same namespace share one block.
pub fn build_header(
    icons: &[IconEntry],
    config: &Config,
) -> Result<(HeaderDocument, HeaderReport), Error> {
    let mut warnings = Vec::new();
    let mut blocks: Vec<ConstantBlock> = Vec::new();

    for (category, members) in group_by_category(icons, &config.default_category) {
        let namespace = identifier::namespace_name(category);
        let mut constants = Vec::new();
        for (stem, alias) in members {
            match identifier::sanitize(stem, &config.leading_digit_prefix) {
                Some(identifier) => constants.push(Constant {
                    identifier,
                    alias: alias.to_owned(),
                }),
                None => warnings.push(HeaderWarning::EmptyIdentifier {
                    alias: alias.to_owned(),
                }),
            }
        }

        match blocks.iter_mut().find(|b| b.namespace == namespace) {
            Some(block) => block.constants.extend(constants),
            None => blocks.push(ConstantBlock {
                namespace,
                constants,
            }),
        }
    }

    for block in &mut blocks {
        let constants = std::mem::take(&mut block.constants);
        block.constants =
            resolve_collisions(&block.namespace, constants, config.on_collision, &mut warnings)?;
    }

    let report = HeaderReport {
        constants: blocks.iter().map(|b| b.constants.len()).sum(),
        warnings,
    };
    let document = HeaderDocument {
        namespace: config.namespace.clone(),
        include: config.include.clone(),
        string_type: config.string_type.clone(),
        prefix: config.prefix.clone(),
        blocks,
    };
    Ok((document, report))
}

/// Escapes `s` for use inside a C++ string literal.
fn escape_cpp(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => out.push_str(&format!("\\x{:02x}\"\"", c as u32)),
            c => out.push(c),
        }
    }
    out
}

impl Display for HeaderDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "#pragma once")?;
        writeln!(f)?;
        writeln!(f, "// Generated icon path constants.")?;
        writeln!(f, "// Do not edit this file by hand.")?;
        writeln!(f)?;
        writeln!(f, "#include {}", self.include)?;
        writeln!(f)?;
        writeln!(f, "namespace {} {{", self.namespace)?;
        writeln!(f)?;
        for block in &self.blocks {
            writeln!(f, "    // {} Icons", block.namespace)?;
            writeln!(f, "    namespace {} {{", block.namespace)?;
            for constant in &block.constants {
                writeln!(
                    f,
                    "        inline const {} {} = \"{}\";",
                    self.string_type,
                    constant.identifier,
                    escape_cpp(&config::resource_uri(&self.prefix, &constant.alias))
                )?;
            }
            writeln!(f, "    }}")?;
            writeln!(f)?;
        }
        writeln!(f, "}}")
    }
}

/// Renders `document` and writes it to `path`.
pub fn write_header(path: &Path, document: &HeaderDocument) -> Result<(), Error> {
    output::write_output(Stage::Header, path, &document.to_string())
}
