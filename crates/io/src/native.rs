// Native sheet format: a JSON object keyed by cell address
//
// {
//   "A1": { "type": "label", "raw": "'Sales", "display": "Sales", "value": 0.0, "format": "   " },
//   "B1": { "type": "value", "raw": "42", "display": "42", "value": 42.0, "format": "   " }
// }

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use retrocalc_engine::address::{cell_ref, parse_cell_ref};
use retrocalc_engine::cell::{Cell, CellKind, CellValue, FormatTag};
use retrocalc_engine::grid::Grid;

use crate::error::IoError;

// Type tags
const TYPE_VALUE: &str = "value";
const TYPE_LABEL: &str = "label";
const TYPE_REPEATING: &str = "repeating";

#[derive(Debug, Serialize, Deserialize)]
struct CellRecord {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    kind: Option<String>,
    #[serde(default)]
    raw: String,
    #[serde(default)]
    display: String,
    /// Computed number, informational only. Non-finite numbers are
    /// written as `null`; load recomputes from `raw`.
    #[serde(default)]
    value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    format: Option<String>,
}

impl CellRecord {
    fn from_cell(cell: &Cell) -> Self {
        let kind = cell.kind().map(|kind| match kind {
            CellKind::Value => TYPE_VALUE,
            CellKind::Label => TYPE_LABEL,
            CellKind::Repeating => TYPE_REPEATING,
        });
        Self {
            kind: kind.map(str::to_string),
            raw: cell.value.raw_text(),
            display: cell.value.display_text(),
            value: Some(cell.value.as_number()).filter(|n| n.is_finite()),
            format: Some(cell.format.as_str().to_string()),
        }
    }

    /// Rebuild the cell. Known type tags restore that kind; anything else
    /// (missing, "formula", tags from older files) goes through content
    /// classification.
    fn into_cell(self) -> Cell {
        let value = match self.kind.as_deref() {
            Some(TYPE_VALUE) => CellValue::from_kind(CellKind::Value, &self.raw),
            Some(TYPE_LABEL) => CellValue::from_kind(CellKind::Label, &self.raw),
            Some(TYPE_REPEATING) => CellValue::from_kind(CellKind::Repeating, &self.raw),
            _ => CellValue::from_input(&self.raw),
        };
        let format = self
            .format
            .as_deref()
            .map(FormatTag::new)
            .unwrap_or_default();
        Cell::new(value).with_format(format)
    }
}

/// Write every populated cell of `grid` to `path`, replacing the file.
///
/// The sheet is written to a sibling `.tmp` file first and renamed over
/// `path`, so a failed write leaves the previous file intact.
pub fn save(grid: &Grid, path: &Path) -> Result<(), IoError> {
    let mut doc = Map::new();
    for ((row, col), cell) in grid.cells() {
        let record = serde_json::to_value(CellRecord::from_cell(cell))
            .map_err(|e| IoError::corrupt(path, e.to_string()))?;
        doc.insert(cell_ref(row, col), record);
    }

    let tmp_path = temp_path(path);
    if let Err(e) = write_document(&Value::Object(doc), &tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(e);
    }
    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        IoError::from_io(path, e)
    })?;

    tracing::info!(path = %path.display(), cells = grid.used_count(), "saved sheet");
    Ok(())
}

/// `budget.json` -> `budget.json.tmp`, in the same directory.
fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}

/// Errors are reported against `target`, the path the user asked for.
fn write_document(doc: &Value, tmp_path: &Path, target: &Path) -> Result<(), IoError> {
    let file = File::create(tmp_path).map_err(|e| IoError::from_io(target, e))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, doc)
        .map_err(|e| IoError::corrupt(target, e.to_string()))?;
    writer.write_all(b"\n").map_err(|e| IoError::from_io(target, e))?;
    writer.flush().map_err(|e| IoError::from_io(target, e))?;
    Ok(())
}

/// Read a sheet from `path` into a fresh grid.
///
/// Keys must be canonical addresses (`B12`, not `b12` or `B12x`).
/// Fails as a whole on the first bad address or record; callers keep their
/// current grid unless this returns `Ok`.
pub fn load(path: &Path) -> Result<Grid, IoError> {
    let contents = fs::read_to_string(path).map_err(|e| IoError::from_io(path, e))?;
    let doc: Map<String, Value> = serde_json::from_str(&contents)
        .map_err(|e| IoError::corrupt(path, e.to_string()))?;

    let mut grid = Grid::new();
    for (address, entry) in doc {
        let (row, col) = parse_cell_ref(&address)
            .map_err(|e| IoError::corrupt(path, e.to_string()))?;
        if cell_ref(row, col) != address {
            return Err(IoError::corrupt(
                path,
                format!("non-canonical cell address: '{address}'"),
            ));
        }
        let record: CellRecord = serde_json::from_value(entry)
            .map_err(|e| IoError::corrupt(path, format!("{address}: {e}")))?;
        grid.set(row, col, record.into_cell());
    }

    tracing::info!(path = %path.display(), cells = grid.used_count(), "loaded sheet");
    Ok(grid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::{tempdir, NamedTempFile};

    fn write_file(content: &str) -> NamedTempFile {
        let mut f = NamedTempFile::with_suffix(".json").unwrap();
        f.write_all(content.as_bytes()).unwrap();
        f.flush().unwrap();
        f
    }

    #[test]
    fn test_save_layout() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("sheet.json");

        let mut grid = Grid::new();
        grid.set(0, 1, Cell::new(CellValue::value("42")));
        grid.set(0, 0, Cell::new(CellValue::label("'Sales")));
        save(&grid, &path).unwrap();

        let doc: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        let keys: Vec<_> = doc.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["A1", "B1"]);
        assert_eq!(doc["A1"]["type"], "label");
        assert_eq!(doc["A1"]["raw"], "'Sales");
        assert_eq!(doc["A1"]["display"], "Sales");
        assert_eq!(doc["B1"]["type"], "value");
        assert_eq!(doc["B1"]["value"], 42.0);
        assert_eq!(doc["B1"]["format"], "   ");
    }

    #[test]
    fn test_load_untyped_records_are_classified() {
        let f = write_file(
            r#"{
                "A1": { "raw": "12.5" },
                "A2": { "type": "formula", "raw": "=A1*2", "value": 25.0 },
                "A3": { "type": "text", "raw": "note" },
                "A4": { "type": "number", "raw": "7" }
            }"#,
        );
        let grid = load(f.path()).unwrap();
        assert_eq!(grid.get(0, 0).value, CellValue::value("12.5"));
        assert_eq!(grid.get(1, 0).value, CellValue::label("=A1*2"));
        assert_eq!(grid.get(2, 0).value, CellValue::label("note"));
        assert_eq!(grid.get(3, 0).value.as_number(), 7.0);
    }

    #[test]
    fn test_load_typed_value_keeps_kind() {
        // A value whose text is not a literal stays a value (number 0)
        let f = write_file(r#"{ "C3": { "type": "value", "raw": "(1+2)", "value": 0.0 } }"#);
        let grid = load(f.path()).unwrap();
        let cell = grid.get(2, 2);
        assert_eq!(cell.kind(), Some(CellKind::Value));
        assert_eq!(cell.value.raw_text(), "(1+2)");
    }

    #[test]
    fn test_load_rejects_bad_address() {
        let f = write_file(r#"{ "A1": { "raw": "ok" }, "A0": { "raw": "bad" } }"#);
        let err = load(f.path()).unwrap_err();
        assert!(matches!(err, IoError::Corrupt { .. }));
    }

    #[test]
    fn test_load_rejects_trailing_garbage_address() {
        let f = write_file(r#"{ "A1junk": { "raw": "x" } }"#);
        let err = load(f.path()).unwrap_err();
        assert!(matches!(err, IoError::Corrupt { .. }));
        assert!(err.to_string().contains("A1junk"));
    }

    #[test]
    fn test_load_rejects_aliased_addresses() {
        // "a1" would otherwise land on the same cell as "A1"
        let f = write_file(r#"{ "A1": { "raw": "first" }, "a1": { "raw": "second" } }"#);
        assert!(matches!(load(f.path()), Err(IoError::Corrupt { .. })));
    }

    #[test]
    fn test_load_accepts_null_value() {
        let f = write_file(r#"{ "A1": { "type": "value", "raw": "3", "value": null } }"#);
        let grid = load(f.path()).unwrap();
        assert_eq!(grid.get(0, 0).value.as_number(), 3.0);
    }

    #[test]
    fn test_save_leaves_no_temp_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("sheet.json");
        save(&Grid::new(), &path).unwrap();
        assert!(path.exists());
        assert!(!temp_path(&path).exists());
    }

    #[test]
    fn test_failed_save_keeps_previous_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("sheet.json");

        let mut grid = Grid::new();
        grid.set(0, 0, Cell::new(CellValue::value("1")));
        save(&grid, &path).unwrap();
        let before = fs::read_to_string(&path).unwrap();

        // A directory in the way of the temp file makes the write fail
        fs::create_dir(temp_path(&path)).unwrap();
        grid.set(0, 0, Cell::new(CellValue::value("2")));
        assert!(save(&grid, &path).is_err());

        assert_eq!(fs::read_to_string(&path).unwrap(), before);
        assert_eq!(load(&path).unwrap().get(0, 0).value.as_number(), 1.0);
    }

    #[test]
    fn test_load_rejects_out_of_range_address() {
        let f = write_file(r#"{ "A257": { "raw": "far" } }"#);
        assert!(matches!(load(f.path()), Err(IoError::Corrupt { .. })));
    }

    #[test]
    fn test_load_rejects_non_object() {
        let f = write_file("[1, 2, 3]");
        assert!(matches!(load(f.path()), Err(IoError::Corrupt { .. })));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempdir().unwrap();
        let err = load(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, IoError::NotFound(_)));
    }

    #[test]
    fn test_save_into_missing_directory_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("sheet.json");
        let err = save(&Grid::new(), &path).unwrap_err();
        assert!(matches!(err, IoError::NotFound(_)));
    }
}
