//! Material library (`.mtl`) parsing: diffuse colors and diffuse texture maps.

use corelib::Rgba;

use crate::error::ScanError;
use crate::readiness::RequestId;
use crate::report::{LineIssueKind, ParseReport};
use crate::scanner::Scanner;

#[derive(Clone, Debug, PartialEq)]
pub struct Material {
    pub name: String,
    pub color: Rgba,
}

impl Material {
    pub fn new(name: impl Into<String>, color: Rgba) -> Self {
        Self {
            name: name.into(),
            color,
        }
    }

    /// Name comparison used for `usemtl` lookups: exact, ignoring surrounding whitespace.
    pub fn matches(&self, name: &str) -> bool {
        self.name.trim() == name.trim()
    }
}

/// Result of parsing one library's text, before any texture is requested.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParsedMtl {
    pub materials: Vec<Material>,
    /// `map_Kd` file names in order of appearance, unresolved.
    pub texture_files: Vec<String>,
    pub report: ParseReport,
}

/// Parse material library text. Never fails; problems land in the report.
pub fn parse_mtl(text: &str) -> ParsedMtl {
    let mut parsed = ParsedMtl::default();
    let mut pending_name: Option<String> = None;

    for (line_no, line) in text.lines().enumerate() {
        let mut sp = Scanner::new(line);
        let Some(command) = sp.next_word() else {
            continue;
        };
        if command.starts_with('#') {
            continue;
        }

        let outcome: Result<(), LineIssueKind> = match command {
            "newmtl" => sp
                .next_word()
                .map(|name| pending_name = Some(name.to_owned()))
                .ok_or_else(|| ScanError::MissingToken.into()),
            "Kd" => match pending_name.take() {
                None => Err(LineIssueKind::OrphanColor),
                Some(name) => match sp.next_floats::<3>() {
                    Ok([r, g, b]) => {
                        parsed.materials.push(Material::new(name, Rgba::opaque(r, g, b)));
                        Ok(())
                    }
                    Err(e) => {
                        pending_name = Some(name);
                        Err(e.into())
                    }
                },
            },
            "map_Kd" => sp
                .next_word()
                .map(|file| parsed.texture_files.push(file.to_owned()))
                .ok_or_else(|| ScanError::MissingToken.into()),
            _ => Err(LineIssueKind::Unsupported),
        };

        if let Err(kind) = outcome {
            parsed.report.push(line_no + 1, command, kind);
        }
    }

    parsed
}

/// One `mtllib` reference of a model and, once loaded, its materials.
#[derive(Clone, Debug)]
pub struct MaterialLibrary {
    pub request: RequestId,
    pub url: String,
    pub materials: Vec<Material>,
    /// Texture loads issued for this library's `map_Kd` lines.
    pub textures: Vec<RequestId>,
    pub report: ParseReport,
    ready: bool,
}

impl MaterialLibrary {
    pub(crate) fn pending(request: RequestId, url: String) -> Self {
        Self {
            request,
            url,
            materials: Vec::new(),
            textures: Vec::new(),
            report: ParseReport::default(),
            ready: false,
        }
    }

    /// `true` once the text was parsed or the file turned out to be absent.
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub(crate) fn fill(&mut self, parsed: ParsedMtl, textures: Vec<RequestId>) {
        log::info!(
            "Material library '{}': {} material(s), {} texture(s)",
            self.url,
            parsed.materials.len(),
            textures.len()
        );
        self.materials = parsed.materials;
        self.report = parsed.report;
        self.textures = textures;
        self.ready = true;
    }

    pub(crate) fn mark_missing(&mut self) {
        log::warn!("Material library '{}' not found; no materials", self.url);
        self.ready = true;
    }

    pub fn find(&self, name: &str) -> Option<&Material> {
        self.materials.iter().find(|m| m.matches(name))
    }
}
