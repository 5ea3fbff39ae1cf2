use serde_yaml_ng::Value;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use crate::common::bit::ModifierValue;
use crate::field::{Field, FieldKind};
use crate::layout::Layout;
use crate::ports::provided::ManifestError;
use crate::fn_log;

/// Loads layout definitions from `<dir>/<file>.yml` (or `.yaml`).
///
/// Each file maps layout names to definitions:
///
/// ```yaml
/// sci:
///   capacity: 32
///   default: "0x100"
///   fields:
///     shift: { kind: flag, offset: 0 }
///     angle-unit: { kind: onehot, offset: 14, labels: [deg, rad, grad] }
///     radix: { kind: enum, offset: 16, width: 2, labels: [bin, oct, dec, hex], codes: [2, 8, 10, 16] }
/// ```
///
/// Integers may be written as YAML numbers or as strings with a `0x` or
/// `0b` prefix. Fields keep their order from the file.
pub struct LayoutManifest {
    manifest_dir: PathBuf,
    cache: HashMap<String, Vec<Layout>>,
}

impl LayoutManifest {
    pub fn new(manifest_dir: &str) -> Self {
        Self {
            manifest_dir: PathBuf::from(manifest_dir),
            cache: HashMap::new(),
        }
    }

    /// Returns layout `name` from `file`, loading the file on first use.
    pub fn layout(&mut self, file: &str, name: &str) -> Result<Layout, ManifestError> {
        fn_log!("LayoutManifest", "layout", file, name);

        self.load_file(file)?;
        self.cache
            .get(file)
            .and_then(|layouts| layouts.iter().find(|l| l.name() == name))
            .cloned()
            .ok_or_else(|| ManifestError::ParseError(format!("layout '{}' not found in '{}'", name, file)))
    }

    /// Every layout defined in `file`, in file order.
    pub fn layouts(&mut self, file: &str) -> Result<&[Layout], ManifestError> {
        self.load_file(file)?;
        Ok(self.cache.get(file).map(|l| l.as_slice()).unwrap_or(&[]))
    }

    pub fn load_file(&mut self, file: &str) -> Result<(), ManifestError> {
        if self.cache.contains_key(file) {
            return Ok(());
        }

        let yml = self.manifest_dir.join(format!("{}.yml", file));
        let yaml = self.manifest_dir.join(format!("{}.yaml", file));
        let file_path = match (yml.exists(), yaml.exists()) {
            (true, true) => {
                return Err(ManifestError::AmbiguousFile(format!(
                    "both {:?} and {:?} exist", yml, yaml
                )));
            }
            (true, false) => yml,
            (false, true) => yaml,
            (false, false) => {
                return Err(ManifestError::FileNotFound(format!("{:?}", yml)));
            }
        };

        let content = fs::read_to_string(&file_path)
            .map_err(|e| ManifestError::ReadError(format!("{:?}: {}", file_path, e)))?;

        let layouts = parse(&content)?;
        self.cache.insert(file.to_string(), layouts);
        Ok(())
    }
}

/// Parses a YAML string holding one or more layout definitions.
///
/// # Examples
///
/// ```
/// use modifier_engine::manifest::parse;
///
/// let yaml = "
/// mini:
///   capacity: 8
///   default: '0b100'
///   fields:
///     shift: { kind: flag, offset: 0 }
///     unit: { kind: onehot, offset: 1, labels: [deg, rad, grad] }
/// ";
///
/// let layouts = parse(yaml).unwrap();
/// assert_eq!(layouts[0].name(), "mini");
/// assert_eq!(layouts[0].default_value(), 0b100);
/// assert_eq!(layouts[0].field("unit").unwrap().width(), 3);
/// ```
pub fn parse(yaml: &str) -> Result<Vec<Layout>, ManifestError> {
    let root: Value = serde_yaml_ng::from_str(yaml)
        .map_err(|e| ManifestError::ParseError(format!("YAML parse error: {}", e)))?;

    let Value::Mapping(mapping) = root else {
        return Err(ManifestError::ParseError("YAML root must be a mapping".to_string()));
    };

    let mut layouts = Vec::new();
    for (key, value) in &mapping {
        let name = yaml_str(key)?;
        layouts.push(parse_layout(name, value)?);
    }
    Ok(layouts)
}

fn parse_layout(name: &str, value: &Value) -> Result<Layout, ManifestError> {
    let capacity = value
        .get("capacity")
        .map(|v| yaml_int(v, "capacity"))
        .transpose()?
        .unwrap_or(32);
    let capacity = u32::try_from(capacity)
        .map_err(|_| ManifestError::ParseError(format!("'{}': capacity {} too large", name, capacity)))?;

    let default: ModifierValue = value
        .get("default")
        .map(|v| yaml_int(v, "default"))
        .transpose()?
        .unwrap_or(0);

    let mut builder = Layout::builder(name, capacity).default_value(default);

    if let Some(fields) = value.get("fields") {
        let Value::Mapping(fields) = fields else {
            return Err(ManifestError::ParseError(format!("'{}.fields' must be a mapping", name)));
        };
        for (k, v) in fields {
            builder = builder.field(parse_field(yaml_str(k)?, v)?);
        }
    }

    Ok(builder.build()?)
}

fn parse_field(name: &str, value: &Value) -> Result<Field, ManifestError> {
    let kind = match value.get("kind").map(yaml_str).transpose()? {
        Some("flag") => FieldKind::Flag,
        Some("onehot") => FieldKind::OneHot,
        Some("enum") => FieldKind::Enum,
        Some(other) => {
            return Err(ManifestError::ParseError(format!("'{}': unknown kind '{}'", name, other)));
        }
        None => return Err(ManifestError::ParseError(format!("'{}': missing kind", name))),
    };

    let offset = value
        .get("offset")
        .map(|v| yaml_int(v, "offset"))
        .transpose()?
        .ok_or_else(|| ManifestError::ParseError(format!("'{}': missing offset", name)))?;

    let labels: Vec<String> = match value.get("labels") {
        Some(Value::Sequence(seq)) => seq.iter().map(yaml_scalar).collect::<Result<_, _>>()?,
        Some(_) => return Err(ManifestError::ParseError(format!("'{}': labels must be a list", name))),
        None => Vec::new(),
    };

    let codes: Vec<u32> = match value.get("codes") {
        Some(Value::Sequence(seq)) => seq
            .iter()
            .map(|v| {
                let n = yaml_int(v, "codes")?;
                u32::try_from(n).map_err(|_| ManifestError::ParseError(format!("'{}': code {} too large", name, n)))
            })
            .collect::<Result<_, _>>()?,
        Some(_) => return Err(ManifestError::ParseError(format!("'{}': codes must be a list", name))),
        None => Vec::new(),
    };

    let width = match value.get("width") {
        Some(v) => yaml_int(v, "width")?,
        None => match kind {
            FieldKind::Flag => 1,
            FieldKind::OneHot if !labels.is_empty() => labels.len() as u128,
            _ => return Err(ManifestError::ParseError(format!("'{}': missing width", name))),
        },
    };

    let to_u32 = |n: u128, what: &str| {
        u32::try_from(n).map_err(|_| ManifestError::ParseError(format!("'{}': {} {} too large", name, what, n)))
    };

    let labels: Vec<&str> = labels.iter().map(|s| s.as_str()).collect();
    Ok(Field::new(name, to_u32(offset, "offset")?, to_u32(width, "width")?, kind)
        .with_labels(&labels)
        .with_codes(&codes))
}

fn yaml_str(value: &Value) -> Result<&str, ManifestError> {
    value
        .as_str()
        .ok_or_else(|| ManifestError::ParseError(format!("expected a string, got {:?}", value)))
}

fn yaml_scalar(value: &Value) -> Result<String, ManifestError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        other => Err(ManifestError::ParseError(format!("expected a scalar label, got {:?}", other))),
    }
}

fn yaml_int(value: &Value, what: &str) -> Result<u128, ManifestError> {
    match value {
        Value::Number(n) => n
            .as_u64()
            .map(u128::from)
            .ok_or_else(|| ManifestError::ParseError(format!("{}: {} is not an unsigned integer", what, n))),
        Value::String(s) => parse_int(s)
            .ok_or_else(|| ManifestError::ParseError(format!("{}: cannot read '{}' as an integer", what, s))),
        other => Err(ManifestError::ParseError(format!("{}: expected an integer, got {:?}", what, other))),
    }
}

fn parse_int(s: &str) -> Option<u128> {
    let s = s.trim().replace('_', "");
    if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        u128::from_str_radix(hex, 16).ok()
    } else if let Some(bin) = s.strip_prefix("0b").or_else(|| s.strip_prefix("0B")) {
        u128::from_str_radix(bin, 2).ok()
    } else {
        s.parse().ok()
    }
}
