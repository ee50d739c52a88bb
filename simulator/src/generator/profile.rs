use airdefcore::radar_interface::TOKEN_DELIMITER;
use anyhow::Context;
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

/// Configuration for generating synthetic radar rows.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub rows: usize,
    pub tokens_per_row: usize,
    pub bits: usize,
    pub seed: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            rows: 10_000,
            tokens_per_row: 11,
            bits: 7,
            seed: 42,
        }
    }
}

impl GeneratorConfig {
    fn normalized_bits(&self) -> usize {
        self.bits.max(1)
    }
}

fn build_token<R: Rng>(rng: &mut R, bits: usize) -> String {
    (0..bits)
        .map(|_| if rng.gen_bool(0.5) { '1' } else { '0' })
        .collect()
}

/// Builds delimited radar lines of uniformly random binary tokens.
pub fn build_radar_lines(config: &GeneratorConfig) -> Vec<String> {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let bits = config.normalized_bits();
    let delimiter = TOKEN_DELIMITER.to_string();

    (0..config.rows)
        .map(|_| {
            (0..config.tokens_per_row)
                .map(|_| build_token(&mut rng, bits))
                .collect::<Vec<_>>()
                .join(delimiter.as_str())
        })
        .collect()
}

pub fn write_radar_file(path: &Path, config: &GeneratorConfig) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating directory {}", parent.display()))?;
    }
    let file =
        File::create(path).with_context(|| format!("creating radar data {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    for line in build_radar_lines(config) {
        writeln!(writer, "{}", line)
            .with_context(|| format!("writing radar data {}", path.display()))?;
    }
    writer
        .flush()
        .with_context(|| format!("flushing radar data {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use airdefcore::radar_interface::{LineSource, TimeStepRow};
    use std::io::BufReader;

    #[test]
    fn generator_builds_expected_shape() {
        let config = GeneratorConfig {
            rows: 5,
            ..Default::default()
        };
        let lines = build_radar_lines(&config);
        assert_eq!(lines.len(), 5);
        for line in &lines {
            let row = TimeStepRow::parse_line(line);
            assert_eq!(row.len(), 11);
            assert!(row
                .tokens
                .iter()
                .all(|t| t.len() == 7 && t.chars().all(|c| c == '0' || c == '1')));
        }
    }

    #[test]
    fn generator_is_reproducible_per_seed() {
        let config = GeneratorConfig {
            rows: 20,
            tokens_per_row: 3,
            bits: 4,
            seed: 13,
        };
        assert_eq!(build_radar_lines(&config), build_radar_lines(&config));
    }

    #[test]
    fn written_file_reads_back_as_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data").join("binary_data.csv");
        let config = GeneratorConfig {
            rows: 25,
            ..Default::default()
        };
        write_radar_file(&path, &config).unwrap();

        let file = File::open(&path).unwrap();
        let rows: Vec<_> = LineSource::new(BufReader::new(file))
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(rows.len(), 25);
    }
}
