//! Reader for the semeion handwritten digit format: one item per line, the
//! input pixels followed by the one-hot target, separated by whitespace.

use std::{fs, path::Path};

use log::info;

use super::{Dataset, LabeledItem};
use crate::{MlErr, Result};

/// Parses a dataset in the semeion format.
///
/// Blank lines are skipped. Inputs must lie in `[0, 1]` and every target value
/// must be exactly `0` or `1`.
///
/// # Arguments
/// * `text` - The contents to parse.
/// * `inputs` - The amount of input values per row.
/// * `outputs` - The amount of target values per row.
///
/// # Returns
/// The parsed dataset or the first malformed row.
pub fn parse(text: &str, inputs: usize, outputs: usize) -> Result<Dataset> {
    let mut items = Vec::new();

    for (idx, row) in text.lines().enumerate() {
        if row.trim().is_empty() {
            continue;
        }

        items.push(parse_row(row, inputs, outputs).map_err(|reason| MlErr::Malformed {
            line: idx + 1,
            reason,
        })?);
    }

    if items.is_empty() {
        return Err(MlErr::EmptyDataset);
    }

    Ok(Dataset::new(items))
}

/// Reads and parses a dataset file in the semeion format.
///
/// # Arguments
/// * `path` - The file to read.
/// * `inputs` - The amount of input values per row.
/// * `outputs` - The amount of target values per row.
///
/// # Returns
/// The parsed dataset, an io error or the first malformed row.
pub fn load<P: AsRef<Path>>(path: P, inputs: usize, outputs: usize) -> Result<Dataset> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)?;
    let dataset = parse(&text, inputs, outputs)?;

    info!(items = dataset.len(); "loaded dataset from {}", path.display());
    Ok(dataset)
}

fn parse_row(row: &str, inputs: usize, outputs: usize) -> std::result::Result<LabeledItem, String> {
    let values = row
        .split_whitespace()
        .map(|token| {
            token
                .parse::<f32>()
                .map_err(|e| format!("invalid number {token:?}: {e}"))
        })
        .collect::<std::result::Result<Vec<_>, _>>()?;

    if values.len() != inputs + outputs {
        return Err(format!(
            "expected {} values, got {}",
            inputs + outputs,
            values.len()
        ));
    }

    let (input, target) = values.split_at(inputs);

    if let Some(x) = input.iter().find(|x| !(0. ..=1.).contains(*x)) {
        return Err(format!("input value {x} is outside [0, 1]"));
    }

    if let Some(t) = target.iter().find(|&&t| t != 0. && t != 1.) {
        return Err(format!("target value {t} is neither 0 nor 1"));
    }

    Ok(LabeledItem::new(input.to_vec(), target.to_vec()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rows() {
        let text = "1.0000 0.0000 0.0000 1 0\n\n0.0000 1.0000 1.0000 0 1\n";
        let dataset = parse(text, 3, 2).unwrap();

        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.get(0).input(), &[1., 0., 0.]);
        assert_eq!(dataset.get(1).target(), &[0., 1.]);
    }

    #[test]
    fn all_zero_targets_are_legal() {
        let dataset = parse("0.5 0 0", 1, 2).unwrap();
        assert_eq!(dataset.get(0).target(), &[0., 0.]);
    }

    #[test]
    fn wrong_value_count() {
        let err = parse("1 0 0 1\n1 0 1", 2, 2).unwrap_err();
        assert!(matches!(err, MlErr::Malformed { line: 2, .. }));
    }

    #[test]
    fn input_out_of_range() {
        assert!(matches!(
            parse("1.5 0 1", 2, 1),
            Err(MlErr::Malformed { line: 1, .. })
        ));
    }

    #[test]
    fn target_not_binary() {
        assert!(matches!(
            parse("1 0 0.5", 2, 1),
            Err(MlErr::Malformed { line: 1, .. })
        ));
    }

    #[test]
    fn not_a_number() {
        assert!(matches!(
            parse("1 x 0", 2, 1),
            Err(MlErr::Malformed { line: 1, .. })
        ));
    }

    #[test]
    fn empty_text() {
        assert!(matches!(parse("\n  \n", 2, 1), Err(MlErr::EmptyDataset)));
    }

    #[test]
    fn missing_file() {
        assert!(matches!(
            load("/nonexistent/semeion.data", 256, 10),
            Err(MlErr::Io(_))
        ));
    }
}
