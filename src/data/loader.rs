use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use arrow::array::{Array, ArrayRef, AsArray, BooleanArray, Int32Array, Int64Array, StringArray};
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde::de::DeserializeOwned;

use super::model::{Catalog, CatalogSet, Color, Theme, parse_trans_flag};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the catalog from a directory containing `colors`, `themes` and
/// `sets` tables. Each table dispatches by extension:
///
/// * `.csv`     – header row, comma delimited (the canonical dump format)
/// * `.parquet` – flat record batches with one column per field
/// * `.json`    – records-oriented array, `[{ "id": ..., ... }, ...]`
///
/// When a stem exists in several formats the CSV wins.
pub fn load_catalog(dir: &Path) -> Result<Catalog> {
    let colors = load_table(dir, "colors", color_from_batch)?;
    let themes = load_table(dir, "themes", theme_from_batch)?;
    let sets = load_table(dir, "sets", set_from_batch)?;
    Ok(Catalog::new(colors, themes, sets))
}

const TABLE_EXTENSIONS: [&str; 4] = ["csv", "parquet", "pq", "json"];

fn resolve_table(dir: &Path, stem: &str) -> Result<PathBuf> {
    for ext in TABLE_EXTENSIONS {
        let candidate = dir.join(format!("{stem}.{ext}"));
        if candidate.is_file() {
            return Ok(candidate);
        }
    }
    bail!(
        "no {stem}.csv / {stem}.parquet / {stem}.json found in {}",
        dir.display()
    )
}

fn load_table<T, F>(dir: &Path, stem: &str, from_batch: F) -> Result<Vec<T>>
where
    T: DeserializeOwned,
    F: Fn(&RecordBatch, usize) -> Result<T>,
{
    let path = resolve_table(dir, stem)?;
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let rows = match ext.as_str() {
        "csv" => load_csv_rows(&path),
        "json" => load_json_rows(&path),
        "parquet" | "pq" => load_parquet_rows(&path, from_batch),
        other => bail!("Unsupported file extension: .{other}"),
    };
    rows.with_context(|| format!("loading table '{stem}' from {}", path.display()))
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv_rows<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;
    let mut rows = Vec::new();
    for (row_no, result) in reader.deserialize().enumerate() {
        let row: T = result.with_context(|| format!("CSV row {row_no}"))?;
        rows.push(row);
    }
    Ok(rows)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, the default
/// `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "id": 0, "name": "Black", "rgb": "05131D", "is_trans": "f" },
///   ...
/// ]
/// ```
fn load_json_rows<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    serde_json::from_str(&text).context("parsing JSON records")
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

fn load_parquet_rows<T, F>(path: &Path, from_batch: F) -> Result<Vec<T>>
where
    F: Fn(&RecordBatch, usize) -> Result<T>,
{
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut rows = Vec::new();
    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        for row in 0..batch.num_rows() {
            rows.push(from_batch(&batch, row).with_context(|| format!("row {row}"))?);
        }
    }
    Ok(rows)
}

fn color_from_batch(batch: &RecordBatch, row: usize) -> Result<Color> {
    Ok(Color {
        id: i32_value(column(batch, "id")?, row)?,
        name: string_value(column(batch, "name")?, row)?,
        rgb: string_value(column(batch, "rgb")?, row)?,
        is_trans: trans_flag_value(column(batch, "is_trans")?, row)?,
    })
}

fn theme_from_batch(batch: &RecordBatch, row: usize) -> Result<Theme> {
    let parent_col = column(batch, "parent_id")?;
    let parent_id = if parent_col.is_null(row) {
        None
    } else {
        Some(u32_value(parent_col, row)?)
    };
    Ok(Theme {
        id: u32_value(column(batch, "id")?, row)?,
        name: string_value(column(batch, "name")?, row)?,
        parent_id,
    })
}

fn set_from_batch(batch: &RecordBatch, row: usize) -> Result<CatalogSet> {
    Ok(CatalogSet {
        set_num: string_value(column(batch, "set_num")?, row)?,
        name: string_value(column(batch, "name")?, row)?,
        year: i32_value(column(batch, "year")?, row)?,
        theme_id: u32_value(column(batch, "theme_id")?, row)?,
        num_parts: u32_value(column(batch, "num_parts")?, row)?,
    })
}

// -- Arrow helpers --

fn column<'a>(batch: &'a RecordBatch, name: &str) -> Result<&'a ArrayRef> {
    let idx = batch
        .schema()
        .index_of(name)
        .map_err(|_| anyhow::anyhow!("Parquet file missing '{name}' column"))?;
    Ok(batch.column(idx))
}

/// Extract a string cell from a Utf8 or LargeUtf8 column.
fn string_value(col: &ArrayRef, row: usize) -> Result<String> {
    match col.data_type() {
        DataType::Utf8 => {
            let arr = col
                .as_any()
                .downcast_ref::<StringArray>()
                .context("expected StringArray")?;
            Ok(arr.value(row).to_string())
        }
        DataType::LargeUtf8 => Ok(col.as_string::<i64>().value(row).to_string()),
        other => bail!("expected a string column, got {other:?}"),
    }
}

/// Extract an integer cell from an Int32 or Int64 column.
fn int_value(col: &ArrayRef, row: usize) -> Result<i64> {
    if col.is_null(row) {
        bail!("unexpected null in integer column");
    }
    match col.data_type() {
        DataType::Int32 => {
            let arr = col.as_any().downcast_ref::<Int32Array>().unwrap();
            Ok(i64::from(arr.value(row)))
        }
        DataType::Int64 => {
            let arr = col.as_any().downcast_ref::<Int64Array>().unwrap();
            Ok(arr.value(row))
        }
        other => bail!("expected an integer column, got {other:?}"),
    }
}

fn i32_value(col: &ArrayRef, row: usize) -> Result<i32> {
    let v = int_value(col, row)?;
    i32::try_from(v).with_context(|| format!("value {v} out of i32 range"))
}

fn u32_value(col: &ArrayRef, row: usize) -> Result<u32> {
    let v = int_value(col, row)?;
    u32::try_from(v).with_context(|| format!("value {v} out of u32 range"))
}

/// Transparency flags are stored as `t`/`f` strings in the dumps but some
/// writers materialize them as Boolean columns. Accept both.
fn trans_flag_value(col: &ArrayRef, row: usize) -> Result<bool> {
    match col.data_type() {
        DataType::Boolean => {
            let arr = col
                .as_any()
                .downcast_ref::<BooleanArray>()
                .context("expected BooleanArray")?;
            Ok(arr.value(row))
        }
        _ => Ok(parse_trans_flag(&string_value(col, row)?)?),
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::sync::Arc;

    use arrow::datatypes::{Field, Schema};
    use parquet::arrow::ArrowWriter;

    use super::*;

    /// Fresh scratch directory per test so parallel tests never collide.
    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("brickscope-{}-{name}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    const COLORS_CSV: &str = "\
id,name,rgb,is_trans
-1,Unknown,0033B2,f
0,Black,05131D,f
36,Trans-Red,C91A09,t
";

    const THEMES_CSV: &str = "\
id,name,parent_id
1,Technic,
18,Star Wars,1
";

    const SETS_CSV: &str = "\
set_num,name,year,theme_id,num_parts
00-1,Weetabix Castle,1970,414,471
7190-1,Millennium Falcon,2000,18,663
";

    #[test]
    fn load_catalog_from_csv_directory() {
        let dir = scratch_dir("csv");
        fs::write(dir.join("colors.csv"), COLORS_CSV).unwrap();
        fs::write(dir.join("themes.csv"), THEMES_CSV).unwrap();
        fs::write(dir.join("sets.csv"), SETS_CSV).unwrap();

        let catalog = load_catalog(&dir).unwrap();
        assert_eq!(catalog.colors.len(), 3);
        assert_eq!(catalog.colors[0].id, -1);
        assert!(catalog.colors[2].is_trans);
        assert_eq!(catalog.themes[0].parent_id, None);
        assert_eq!(catalog.themes[1].parent_id, Some(1));
        assert_eq!(catalog.sets[1].num_parts, 663);
        assert_eq!(catalog.theme_name(18), Some("Star Wars"));
    }

    #[test]
    fn bad_trans_flag_aborts_the_load() {
        let dir = scratch_dir("badflag");
        fs::write(
            dir.join("colors.csv"),
            "id,name,rgb,is_trans\n0,Black,05131D,maybe\n",
        )
        .unwrap();
        fs::write(dir.join("themes.csv"), THEMES_CSV).unwrap();
        fs::write(dir.join("sets.csv"), SETS_CSV).unwrap();

        let err = load_catalog(&dir).unwrap_err();
        assert!(format!("{err:#}").contains("colors"));
    }

    #[test]
    fn missing_table_is_reported_by_stem() {
        let dir = scratch_dir("missing");
        fs::write(dir.join("colors.csv"), COLORS_CSV).unwrap();

        let err = load_catalog(&dir).unwrap_err();
        assert!(format!("{err:#}").contains("themes"));
    }

    #[test]
    fn load_json_records_table() {
        let dir = scratch_dir("json");
        fs::write(dir.join("colors.csv"), COLORS_CSV).unwrap();
        fs::write(dir.join("themes.csv"), THEMES_CSV).unwrap();
        fs::write(
            dir.join("sets.json"),
            r#"[{"set_num":"001-1","name":"Gift Set","year":1949,"theme_id":1,"num_parts":142}]"#,
        )
        .unwrap();

        let catalog = load_catalog(&dir).unwrap();
        assert_eq!(catalog.sets.len(), 1);
        assert_eq!(catalog.sets[0].year, 1949);
    }

    #[test]
    fn load_colors_from_parquet() {
        let dir = scratch_dir("parquet");
        let schema = Arc::new(Schema::new(vec![
            Field::new("id", DataType::Int64, false),
            Field::new("name", DataType::Utf8, false),
            Field::new("rgb", DataType::Utf8, false),
            Field::new("is_trans", DataType::Boolean, false),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(Int64Array::from(vec![0, 36])),
                Arc::new(StringArray::from(vec!["Black", "Trans-Red"])),
                Arc::new(StringArray::from(vec!["05131D", "C91A09"])),
                Arc::new(BooleanArray::from(vec![false, true])),
            ],
        )
        .unwrap();

        let path = dir.join("colors.parquet");
        let file = fs::File::create(&path).unwrap();
        let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let colors = load_parquet_rows(&path, color_from_batch).unwrap();
        assert_eq!(colors.len(), 2);
        assert_eq!(colors[1].name, "Trans-Red");
        assert!(colors[1].is_trans);
    }
}
