//! Qt resource collection (`.qrc`) generation.
use crate::{config::Config, icon::IconEntry, output, Error, Stage};
use quick_xml::{
    events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event},
    Writer,
};
use std::{io, path::Path};

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct ManifestEntry {
    pub alias: String,
    pub source: String,
}

/// A resource collection with a single `<qresource>` group.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Manifest {
    pub prefix: String,
    pub entries: Vec<ManifestEntry>,
}

impl Manifest {
    /// `source_prefix` is the path from the manifest's directory to the icon
    /// root; an empty prefix means they are the same directory.
    pub fn from_icons(prefix: &str, source_prefix: &str, icons: &[IconEntry]) -> Manifest {
        let source_prefix = source_prefix.trim_end_matches('/');
        let entries = icons
            .iter()
            .map(|icon| ManifestEntry {
                alias: icon.alias().to_owned(),
                source: if source_prefix.is_empty() || source_prefix == "." {
                    icon.path().to_owned()
                } else {
                    format!("{}/{}", source_prefix, icon.path())
                },
            })
            .collect();
        Manifest {
            prefix: prefix.to_owned(),
            entries,
        }
    }

    pub fn from_config(config: &Config, icons: &[IconEntry]) -> Manifest {
        Manifest::from_icons(&config.prefix, &config.source_prefix(), icons)
    }

    pub fn to_xml(&self) -> Result<String, Error> {
        fn emit(writer: &mut Writer<Vec<u8>>, event: Event) -> Result<(), Error> {
            writer.write_event(event).map_err(Error::Serialize)
        }

        let mut writer = Writer::new_with_indent(Vec::new(), b' ', 4);
        emit(
            &mut writer,
            Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)),
        )?;
        emit(&mut writer, Event::Start(BytesStart::new("RCC")))?;

        let mut qresource = BytesStart::new("qresource");
        qresource.push_attribute(("prefix", self.prefix.as_str()));
        emit(&mut writer, Event::Start(qresource))?;
        for entry in &self.entries {
            let mut file = BytesStart::new("file");
            file.push_attribute(("alias", entry.alias.as_str()));
            emit(&mut writer, Event::Start(file))?;
            emit(&mut writer, Event::Text(BytesText::new(&entry.source)))?;
            emit(&mut writer, Event::End(BytesEnd::new("file")))?;
        }
        emit(&mut writer, Event::End(BytesEnd::new("qresource")))?;
        emit(&mut writer, Event::End(BytesEnd::new("RCC")))?;

        let mut xml = String::from_utf8(writer.into_inner())
            .map_err(|e| Error::Serialize(io::Error::new(io::ErrorKind::InvalidData, e)))?;
        xml.push('\n');
        Ok(xml)
    }
}

/// Serializes `manifest` and writes it to `path`.
pub fn write_manifest(path: &Path, manifest: &Manifest) -> Result<(), Error> {
    output::write_output(Stage::Manifest, path, &manifest.to_xml()?)
}
