//! Wavefront OBJ model parsing.
//!
//! Supported commands: `v`, `vn`, `vt`, `f`, `o`/`g`, `usemtl`, `mtllib`. Anything
//! else is skipped and noted in the [`ParseReport`]. Parsing does no I/O: `mtllib`
//! and `map_Kd` references become [`LoadRequest`]s that a collaborator fulfils
//! through [`ObjModel::complete`].
//!
//! [`LoadRequest`]: crate::readiness::LoadRequest

use corelib::{Vec2, Vec3, vec2, vec3};

use crate::error::{FaceError, ObjError, ObjResult, ScanError};
use crate::mtl::{MaterialLibrary, parse_mtl};
use crate::readiness::{
    Completion, LoadRequest, RequestId, ResourceKind, ResourceState, ResourceTracker,
};
use crate::report::{LineIssueKind, ParseReport};
use crate::scanner::{Scanner, parse_int};
use crate::texture::TextureData;
use crate::triangulate::{fan_len, synthesize_normal};

/// Name given to the group created when geometry precedes any `o`/`g`.
pub const DEFAULT_GROUP: &str = "default";

/// Parse-time knobs.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParseOptions {
    /// Uniform factor applied to every `v` position.
    pub scale: f32,
    /// Negate synthesized face normals.
    pub reverse_normals: bool,
    /// Fail the whole parse on the first line that loses data.
    pub strict: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            scale: 1.0,
            reverse_normals: false,
            strict: false,
        }
    }
}

/// One `(vertex, texcoord, normal)` reference of a face, 0-based.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Corner {
    pub vertex: usize,
    pub texcoord: Option<usize>,
    pub normal: Option<usize>,
}

/// A polygon as written on one `f` line. Immutable once parsed.
#[derive(Clone, Debug, PartialEq)]
pub struct Face {
    material: String,
    corners: Vec<Corner>,
    normal: Vec3,
}

impl Face {
    pub fn material(&self) -> &str {
        &self.material
    }

    /// Corners in source order (not triangulated).
    pub fn corners(&self) -> &[Corner] {
        &self.corners
    }

    /// Synthesized face normal, used where corners lack a `vn` reference.
    pub fn normal(&self) -> Vec3 {
        self.normal
    }

    /// Corners emitted after fan triangulation.
    pub fn corner_count(&self) -> usize {
        fan_len(self.corners.len())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Group {
    pub name: String,
    faces: Vec<Face>,
    corner_count: usize,
}

impl Group {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            faces: Vec::new(),
            corner_count: 0,
        }
    }

    fn add_face(&mut self, face: Face) {
        self.corner_count += face.corner_count();
        self.faces.push(face);
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    /// Total triangulated corners over all faces.
    pub fn corner_count(&self) -> usize {
        self.corner_count
    }
}

/// Directory part of `source`: everything up to and including the last `/`,
/// unless that `/` is the very first character.
pub fn base_directory(source: &str) -> &str {
    match source.rfind('/') {
        Some(i) if i > 0 => &source[..=i],
        _ => "",
    }
}

#[derive(Debug)]
pub struct ObjModel {
    pub(crate) source: String,
    pub(crate) options: ParseOptions,
    pub(crate) positions: Vec<Vec3>,
    pub(crate) normals: Vec<Vec3>,
    pub(crate) texcoords: Vec<Vec2>,
    pub(crate) groups: Vec<Group>,
    pub(crate) libraries: Vec<MaterialLibrary>,
    pub(crate) resources: ResourceTracker,
    pub(crate) report: ParseReport,
}

impl ObjModel {
    /// Parse OBJ text. `source` is the path/URL the text came from and only
    /// serves to resolve `mtllib` names.
    pub fn parse(source: &str, text: &str, options: ParseOptions) -> ObjResult<Self> {
        if text.trim().is_empty() {
            return Err(ObjError::EmptyInput);
        }
        log::info!("Parsing OBJ '{}'", source);

        let mut parser = Parser {
            model: ObjModel {
                source: source.to_owned(),
                options,
                positions: Vec::new(),
                normals: Vec::new(),
                texcoords: Vec::new(),
                groups: Vec::new(),
                libraries: Vec::new(),
                resources: ResourceTracker::new(),
                report: ParseReport::default(),
            },
            material: String::new(),
        };

        for (line_no, line) in text.lines().enumerate() {
            let mut sp = Scanner::new(line);
            let Some(command) = sp.next_word() else {
                continue;
            };
            if command.starts_with('#') {
                continue;
            }
            if let Err(kind) = parser.parse_command(command, &mut sp) {
                let fatal = options.strict && kind.is_error();
                parser.model.report.push(line_no + 1, command, kind);
                if fatal {
                    if let Some(issue) = parser.model.report.issues().last() {
                        return Err(ObjError::Line(issue.clone()));
                    }
                }
            }
        }

        let model = parser.model;
        log::info!(
            "Parsed '{}': {} vertices, {} normals, {} texcoords, {} group(s), {} corners, {} issue(s)",
            model.source,
            model.positions.len(),
            model.normals.len(),
            model.texcoords.len(),
            model.groups.len(),
            model.corner_count(),
            model.report.issues().len()
        );
        Ok(model)
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn options(&self) -> ParseOptions {
        self.options
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn normals(&self) -> &[Vec3] {
        &self.normals
    }

    pub fn texcoords(&self) -> &[Vec2] {
        &self.texcoords
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn libraries(&self) -> &[MaterialLibrary] {
        &self.libraries
    }

    pub fn resources(&self) -> &ResourceTracker {
        &self.resources
    }

    pub fn report(&self) -> &ParseReport {
        &self.report
    }

    /// Size of the vertex pool, the figure shown to users as "vertex count".
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Corners the flattened mesh will hold.
    pub fn corner_count(&self) -> usize {
        self.groups.iter().map(Group::corner_count).sum()
    }

    /// Loads queued since the last call (material libraries, then textures as
    /// libraries complete).
    pub fn take_requests(&mut self) -> Vec<LoadRequest> {
        self.resources.take_requests()
    }

    /// Every material library has been parsed or found missing.
    pub fn mtl_ready(&self) -> bool {
        self.libraries.iter().all(MaterialLibrary::is_ready)
    }

    /// No texture image is still loading.
    pub fn tex_ready(&self) -> bool {
        self.resources.settled(ResourceKind::Texture)
    }

    /// The model may be flattened.
    pub fn is_ready(&self) -> bool {
        self.mtl_ready() && self.tex_ready()
    }

    /// Decoded textures with the URL they were loaded from.
    pub fn textures(&self) -> impl Iterator<Item = (&str, &TextureData)> {
        self.resources
            .records()
            .filter_map(|(_, r)| r.texture.as_ref().map(|t| (r.url.as_str(), t)))
    }

    pub fn has_textures(&self) -> bool {
        self.textures().next().is_some()
    }

    /// Feed back the outcome of a load request. Completing an already settled
    /// request is ignored.
    pub fn complete(&mut self, id: RequestId, completion: Completion) -> ObjResult<()> {
        let record = self
            .resources
            .get(id)
            .ok_or(ObjError::UnknownRequest(id))?;
        if record.state != ResourceState::Pending {
            log::warn!("Request {:?} ('{}') already settled; ignoring", id, record.url);
            return Ok(());
        }
        let kind = record.kind;

        let state = match (kind, completion) {
            (ResourceKind::MaterialLibrary, Completion::Text(text)) => {
                self.fill_library(id, &text);
                ResourceState::Ready
            }
            (ResourceKind::MaterialLibrary, Completion::Missing) => {
                if let Some(lib) = self.library_mut(id) {
                    lib.mark_missing();
                }
                ResourceState::Missing
            }
            (ResourceKind::Texture, Completion::Image(texture)) => {
                if let Some(record) = self.resources.get_mut(id) {
                    log::info!(
                        "Texture '{}' ready ({}x{})",
                        record.url,
                        texture.width,
                        texture.height
                    );
                    record.texture = Some(texture);
                }
                ResourceState::Ready
            }
            (ResourceKind::Texture, Completion::Missing) => {
                log::warn!("Texture request {:?} failed; rendering untextured", id);
                ResourceState::Missing
            }
            (expected, _) => return Err(ObjError::CompletionMismatch { id, expected }),
        };

        if let Some(record) = self.resources.get_mut(id) {
            record.state = state;
        }
        Ok(())
    }

    fn library_mut(&mut self, id: RequestId) -> Option<&mut MaterialLibrary> {
        self.libraries.iter_mut().find(|l| l.request == id)
    }

    fn fill_library(&mut self, id: RequestId, text: &str) {
        let parsed = parse_mtl(text);
        let base = base_directory(&self.source).to_owned();
        let textures: Vec<RequestId> = parsed
            .texture_files
            .iter()
            .map(|file| {
                self.resources
                    .request(ResourceKind::Texture, format!("{base}{file}"))
            })
            .collect();
        if let Some(lib) = self.library_mut(id) {
            lib.fill(parsed, textures);
        }
    }
}

/// Line-by-line state on top of the model being built.
struct Parser {
    model: ObjModel,
    /// Set by `usemtl`, stamped on every following face.
    material: String,
}

impl Parser {
    fn parse_command(&mut self, command: &str, sp: &mut Scanner<'_>) -> Result<(), LineIssueKind> {
        match command {
            "mtllib" => {
                let name = sp.next_word().ok_or(ScanError::MissingToken)?;
                let url = format!("{}{}", base_directory(&self.model.source), name);
                let request = self
                    .model
                    .resources
                    .request(ResourceKind::MaterialLibrary, url.clone());
                self.model
                    .libraries
                    .push(MaterialLibrary::pending(request, url));
            }
            "o" | "g" => {
                let name = sp.next_word().unwrap_or(DEFAULT_GROUP);
                log::debug!("Group '{}'", name);
                self.model.groups.push(Group::new(name));
            }
            "v" => {
                let [x, y, z] = sp.next_floats::<3>()?;
                if self.model.groups.is_empty() {
                    self.model.groups.push(Group::new(DEFAULT_GROUP));
                }
                self.model
                    .positions
                    .push(vec3(x, y, z) * self.model.options.scale);
            }
            "vn" => {
                let [x, y, z] = sp.next_floats::<3>()?;
                self.model.normals.push(vec3(x, y, z));
            }
            "vt" => {
                let [u, v] = sp.next_floats::<2>()?;
                self.model.texcoords.push(vec2(u, v));
            }
            "usemtl" => {
                self.material = sp.next_word().unwrap_or_default().to_owned();
            }
            "f" => {
                let face = self.parse_face(sp)?;
                if self.model.groups.is_empty() {
                    self.model.groups.push(Group::new(DEFAULT_GROUP));
                }
                if let Some(group) = self.model.groups.last_mut() {
                    group.add_face(face);
                }
            }
            _ => return Err(LineIssueKind::Unsupported),
        }
        Ok(())
    }

    fn parse_face(&self, sp: &mut Scanner<'_>) -> Result<Face, FaceError> {
        let m = &self.model;
        let mut corners = Vec::new();
        while let Some(word) = sp.next_word() {
            corners.push(parse_corner(
                word,
                m.positions.len(),
                m.texcoords.len(),
                m.normals.len(),
            )?);
        }
        if corners.len() < 3 {
            return Err(FaceError::TooFewCorners(corners.len()));
        }

        let normal = synthesize_normal(&m.positions, &corners, m.options.reverse_normals);
        Ok(Face {
            material: self.material.clone(),
            corners,
            normal,
        })
    }
}

/// Parses `v`, `v/t`, `v/t/n` or `v//n` into 0-based indices.
fn parse_corner(
    word: &str,
    pos_count: usize,
    tex_count: usize,
    norm_count: usize,
) -> Result<Corner, FaceError> {
    let malformed = || FaceError::MalformedReference(word.to_owned());

    let (v, t, n) = if let Some((v, n)) = word.split_once("//") {
        (v, None, Some(n))
    } else {
        let mut parts = word.split('/');
        let v = parts.next().ok_or_else(malformed)?;
        let t = parts.next();
        let n = parts.next();
        if parts.next().is_some() {
            return Err(malformed());
        }
        (v, t, n)
    };

    let optional = |token: Option<&str>, len: usize, pool: &'static str| {
        token
            .filter(|s| !s.is_empty())
            .map(|s| resolve_index(s, len, pool))
            .transpose()
    };

    Ok(Corner {
        vertex: resolve_index(v, pos_count, "vertex")?,
        texcoord: optional(t, tex_count, "texcoord")?,
        normal: optional(n, norm_count, "normal")?,
    })
}

/// 1-based (or negative, relative to the end) OBJ index into a pool of `len`.
fn resolve_index(token: &str, len: usize, pool: &'static str) -> Result<usize, FaceError> {
    let raw = parse_int(token)?;
    let idx = match raw {
        0 => return Err(FaceError::ZeroIndex),
        r if r > 0 => r as i64 - 1,
        r => len as i64 + r as i64,
    };
    if idx < 0 || idx as usize >= len {
        return Err(FaceError::OutOfRange { pool, raw, len });
    }
    Ok(idx as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> ObjModel {
        ObjModel::parse("models/test.obj", text, ParseOptions::default()).expect("parse")
    }

    const QUAD: &str = "\
v 0 0 0
v 1 0 0
v 1 1 0
v 0 1 0
";

    #[test]
    fn single_triangle_goes_to_default_group() {
        let model = parse("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n");
        assert_eq!(model.groups().len(), 1);
        let group = &model.groups()[0];
        assert_eq!(group.name, DEFAULT_GROUP);
        assert_eq!(group.faces().len(), 1);
        let face = &group.faces()[0];
        assert_eq!(face.corner_count(), 3);
        let v: Vec<_> = face.corners().iter().map(|c| c.vertex).collect();
        assert_eq!(v, vec![0, 1, 2]);
        assert_eq!(face.material(), "");
        assert!(model.report().is_clean());
    }

    #[test]
    fn scale_applies_to_positions_only() {
        let opts = ParseOptions {
            scale: 2.0,
            ..ParseOptions::default()
        };
        let model = ObjModel::parse("a.obj", "v 1 2 3\nvn 0 0 1\nvt 0.5 0.25\n", opts)
            .expect("parse");
        assert_eq!(model.positions(), &[vec3(2.0, 4.0, 6.0)]);
        assert_eq!(model.normals(), &[vec3(0.0, 0.0, 1.0)]);
        assert_eq!(model.texcoords(), &[vec2(0.5, 0.25)]);
    }

    #[test]
    fn corner_reference_forms() {
        let c = parse_corner("2", 3, 3, 3).expect("v");
        assert_eq!(c, Corner { vertex: 1, texcoord: None, normal: None });
        let c = parse_corner("2/3", 3, 3, 3).expect("v/t");
        assert_eq!(c, Corner { vertex: 1, texcoord: Some(2), normal: None });
        let c = parse_corner("1/2/3", 3, 3, 3).expect("v/t/n");
        assert_eq!(c, Corner { vertex: 0, texcoord: Some(1), normal: Some(2) });
        let c = parse_corner("3//1", 3, 3, 3).expect("v//n");
        assert_eq!(c, Corner { vertex: 2, texcoord: None, normal: Some(0) });
    }

    #[test]
    fn negative_indices_are_relative() {
        let c = parse_corner("-1/-2/-3", 4, 4, 4).expect("relative");
        assert_eq!(c, Corner { vertex: 3, texcoord: Some(2), normal: Some(1) });
    }

    #[test]
    fn bad_corner_references() {
        assert_eq!(parse_corner("0", 3, 0, 0), Err(FaceError::ZeroIndex));
        assert_eq!(
            parse_corner("4", 3, 0, 0),
            Err(FaceError::OutOfRange { pool: "vertex", raw: 4, len: 3 })
        );
        assert_eq!(
            parse_corner("1/1", 3, 0, 0),
            Err(FaceError::OutOfRange { pool: "texcoord", raw: 1, len: 0 })
        );
        assert_eq!(
            parse_corner("1/2/3/4", 3, 3, 3),
            Err(FaceError::MalformedReference("1/2/3/4".into()))
        );
        assert_eq!(
            parse_corner("x", 3, 0, 0),
            Err(FaceError::Scan(ScanError::InvalidNumber { token: "x".into() }))
        );
    }

    #[test]
    fn quad_face_keeps_source_corners() {
        let model = parse(&format!("{QUAD}f 1 2 3 4\n"));
        let face = &model.groups()[0].faces()[0];
        assert_eq!(face.corners().len(), 4);
        assert_eq!(face.corner_count(), 6);
        assert_eq!(model.corner_count(), 6);

        let tris = face.triangulate();
        assert_eq!(tris.corners.len(), 6);
        assert_eq!(tris.corners[0].vertex, 0);
        assert_eq!(tris.corners[3].vertex, 0);
    }

    #[test]
    fn groups_and_materials() {
        let text = format!(
            "{QUAD}o first\nusemtl Red\nf 1 2 3\ng second\nf 1 3 4\nusemtl\nf 2 3 4\n"
        );
        let model = parse(&text);
        let names: Vec<_> = model.groups().iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec![DEFAULT_GROUP, "first", "second"]);
        assert!(model.groups()[0].faces().is_empty());
        assert_eq!(model.groups()[1].faces()[0].material(), "Red");
        assert_eq!(model.groups()[2].faces()[0].material(), "Red");
        assert_eq!(model.groups()[2].faces()[1].material(), "");
        assert_eq!(model.groups()[2].corner_count(), 6);
    }

    #[test]
    fn unnamed_group_gets_default_name() {
        let model = parse("g\nv 0 0 0\n");
        assert_eq!(model.groups().len(), 1);
        assert_eq!(model.groups()[0].name, DEFAULT_GROUP);
    }

    #[test]
    fn synthesized_normal_is_stored_on_face() {
        let model = parse("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n");
        let n = model.groups()[0].faces()[0].normal();
        assert!(n.abs_diff_eq(vec3(0.0, 0.0, -1.0), 1e-6));

        let opts = ParseOptions {
            reverse_normals: true,
            ..ParseOptions::default()
        };
        let model = ObjModel::parse("a.obj", "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n", opts)
            .expect("parse");
        let n = model.groups()[0].faces()[0].normal();
        assert!(n.abs_diff_eq(vec3(0.0, 0.0, 1.0), 1e-6));
    }

    #[test]
    fn malformed_lines_are_reported_and_skipped() {
        let model = parse("v 0 0 0\nv 1 nope 0\nvt 1\ns off\nf 1 2\nf 1 1 1\n");
        assert_eq!(model.vertex_count(), 1);
        assert!(model.texcoords().is_empty());
        let lines: Vec<_> = model.report().errors().map(|i| i.line).collect();
        assert_eq!(lines, vec![2, 3, 5]);
        // `s` is a notice, the all-same-vertex face is kept with the default normal
        assert_eq!(model.report().issues().len(), 4);
        assert_eq!(model.groups()[0].faces().len(), 1);
        assert_eq!(model.groups()[0].faces()[0].normal(), Vec3::Y);
    }

    #[test]
    fn non_finite_coordinates_are_rejected() {
        let model = parse("v nan 0 0\nv 0 inf 0\nvn 0 0 -infinity\nvt NaN 0\nv 1 2 3\n");
        assert_eq!(model.positions(), &[vec3(1.0, 2.0, 3.0)]);
        assert!(model.normals().is_empty());
        assert!(model.texcoords().is_empty());
        let lines: Vec<_> = model.report().errors().map(|i| i.line).collect();
        assert_eq!(lines, vec![1, 2, 3, 4]);
        assert!(
            model
                .report()
                .issues()
                .iter()
                .all(|i| matches!(i.kind, LineIssueKind::Malformed(_)))
        );
    }

    #[test]
    fn strict_mode_fails_on_first_error() {
        let opts = ParseOptions {
            strict: true,
            ..ParseOptions::default()
        };
        let err = ObjModel::parse("a.obj", "s 1\nv 0 0 0\nv 1 x 0\n", opts).unwrap_err();
        match err {
            ObjError::Line(issue) => {
                assert_eq!(issue.line, 3);
                assert_eq!(issue.command, "v");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn empty_input_is_an_error() {
        assert!(matches!(
            ObjModel::parse("a.obj", "", ParseOptions::default()),
            Err(ObjError::EmptyInput)
        ));
        assert!(matches!(
            ObjModel::parse("a.obj", " \n\t\n", ParseOptions::default()),
            Err(ObjError::EmptyInput)
        ));
    }

    #[test]
    fn comments_and_crlf() {
        let model = parse("# header\r\n#no-space\r\nv 0 0 0\r\nv 1 0 0\r\nv 0 1 0\r\nf 1 2 3\r\n");
        assert_eq!(model.vertex_count(), 3);
        assert!(model.report().is_clean());
    }

    #[test]
    fn base_directory_rules() {
        assert_eq!(base_directory("/home/models/cube.obj"), "/home/models/");
        assert_eq!(base_directory("http://host/m/a.obj"), "http://host/m/");
        assert_eq!(base_directory("cube.obj"), "");
        assert_eq!(base_directory("/cube.obj"), "");
    }

    #[test]
    fn mtllib_registers_pending_library() {
        let mut model = parse("mtllib cube.mtl\nv 0 0 0\n");
        assert_eq!(model.libraries().len(), 1);
        assert_eq!(model.libraries()[0].url, "models/cube.mtl");
        assert!(!model.mtl_ready());
        assert!(!model.is_ready());

        let reqs = model.take_requests();
        assert_eq!(
            reqs,
            vec![LoadRequest {
                id: RequestId(0),
                kind: ResourceKind::MaterialLibrary,
                url: "models/cube.mtl".into(),
            }]
        );
    }

    #[test]
    fn ready_without_libraries() {
        let model = parse(QUAD);
        assert!(model.mtl_ready());
        assert!(model.tex_ready());
        assert!(model.is_ready());
    }

    #[test]
    fn missing_library_becomes_ready_with_no_materials() {
        let mut model = parse("mtllib gone.mtl\n");
        let id = model.take_requests()[0].id;
        model.complete(id, Completion::Missing).expect("complete");
        assert!(model.mtl_ready());
        assert!(model.libraries()[0].materials.is_empty());
        assert_eq!(
            model.resources().get(id).map(|r| r.state),
            Some(ResourceState::Missing)
        );
    }

    #[test]
    fn library_textures_gate_readiness() {
        let mut model = parse("mtllib lib.mtl\n");
        let lib = model.take_requests()[0].id;
        model
            .complete(lib, Completion::Text("newmtl A\nKd 1 0 0\nmap_Kd a.png\n".into()))
            .expect("complete lib");
        assert!(model.mtl_ready());
        assert!(!model.tex_ready());

        let reqs = model.take_requests();
        assert_eq!(reqs.len(), 1);
        assert_eq!(reqs[0].kind, ResourceKind::Texture);
        assert_eq!(reqs[0].url, "models/a.png");
        assert_eq!(model.libraries()[0].textures, vec![reqs[0].id]);

        let texture = TextureData::from_rgba8(1, 1, vec![255; 4]).expect("texture");
        model
            .complete(reqs[0].id, Completion::Image(texture))
            .expect("complete texture");
        assert!(model.is_ready());
        assert!(model.has_textures());
        assert_eq!(model.textures().next().map(|(url, _)| url), Some("models/a.png"));
    }

    #[test]
    fn failed_texture_settles() {
        let mut model = parse("mtllib lib.mtl\n");
        let lib = model.take_requests()[0].id;
        model
            .complete(lib, Completion::Text("map_Kd a.png\n".into()))
            .expect("complete lib");
        let tex = model.take_requests()[0].id;
        model.complete(tex, Completion::Missing).expect("complete texture");
        assert!(model.is_ready());
        assert!(!model.has_textures());
    }

    #[test]
    fn completion_errors() {
        let mut model = parse("mtllib lib.mtl\n");
        let lib = model.take_requests()[0].id;
        assert!(matches!(
            model.complete(RequestId(9), Completion::Missing),
            Err(ObjError::UnknownRequest(RequestId(9)))
        ));
        let texture = TextureData::from_rgba8(1, 1, vec![0; 4]).expect("texture");
        assert!(matches!(
            model.complete(lib, Completion::Image(texture)),
            Err(ObjError::CompletionMismatch { .. })
        ));
        assert!(!model.mtl_ready());

        model.complete(lib, Completion::Missing).expect("first");
        // second completion is ignored
        model
            .complete(lib, Completion::Text("newmtl A\nKd 1 1 1\n".into()))
            .expect("second");
        assert!(model.libraries()[0].materials.is_empty());
    }
}
