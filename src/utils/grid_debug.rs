// src/utils/grid_debug.rs
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use crate::extractors::rows::{classify_row, join_cells};
use crate::utils::error::AppError;
use crate::workbook::Worksheet;

/// Renders a worksheet with the classification of every row, e.g.
/// `0004 [header     ] Position Amount Status`.
pub fn render_debug_grid(worksheet: &Worksheet) -> String {
    let mut out = format!("# sheet: {} ({} rows)\n", worksheet.name, worksheet.rows.len());
    for (index, row) in worksheet.rows.iter().enumerate() {
        let kind = classify_row(row);
        out.push_str(&format!("{:04} [{:<11}] {}\n", index + 1, kind.label(), join_cells(row)));
    }
    out
}

/// Saves the annotated rendering of one worksheet to a file
pub fn save_debug_grid(worksheet: &Worksheet, path: &Path) -> Result<(), AppError> {
    let mut file = BufWriter::new(File::create(path)?);
    file.write_all(render_debug_grid(worksheet).as_bytes())?;
    file.flush()?;

    tracing::info!("Saved debug grid to {}", path.display());
    Ok(())
}

/// Writes one `<sheet>.txt` per worksheet into `debug_dir`.
pub fn save_debug_grids(worksheets: &[Worksheet], debug_dir: &Path) -> Result<Vec<PathBuf>, AppError> {
    std::fs::create_dir_all(debug_dir)?;

    let mut written = Vec::with_capacity(worksheets.len());
    for (index, worksheet) in worksheets.iter().enumerate() {
        let path = debug_dir.join(format!("{:02}_{}.txt", index + 1, file_safe(&worksheet.name)));
        save_debug_grid(worksheet, &path)?;
        written.push(path);
    }
    Ok(written)
}

// Sheet names may contain characters that are not valid in file names.
fn file_safe(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rendering_labels_rows() {
        let sheet = Worksheet::from_strs(
            "Scopus",
            &[&["Journal of X"], &["Position", "Amount", "Status"], &["Author 1", "5k", "Open"], &[""]],
        );
        let rendered = render_debug_grid(&sheet);
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines[0], "# sheet: Scopus (4 rows)");
        assert_eq!(lines[1], "0001 [text       ] Journal of X");
        assert_eq!(lines[2], "0002 [header     ] Position Amount Status");
        assert_eq!(lines[3], "0003 [author     ] Author 1 5k Open");
        assert_eq!(lines[4], "0004 [blank      ] ");
    }

    #[test]
    fn test_grids_are_written_per_sheet() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("debug").join("authors");
        let sheets = vec![
            Worksheet::from_strs("Q1/Q2 journals", &[&["a"]]),
            Worksheet::from_strs("Other", &[]),
        ];
        let written = save_debug_grids(&sheets, &dir).unwrap();

        assert_eq!(written.len(), 2);
        assert!(written[0].ends_with("01_Q1_Q2_journals.txt"));
        assert!(std::fs::read_to_string(&written[1]).unwrap().starts_with("# sheet: Other"));
    }
}
