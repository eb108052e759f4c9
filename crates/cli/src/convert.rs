//! WOFF file conversion.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use log::info;
use typelift_woff::Transcoder;

use crate::{
    config::OTF_EXTENSION,
    io::{FontFile, glob_fonts},
    parallel::{BatchResult, run_parallel},
};

/// Output path for a converted font: the input's file name with an `.otf`
/// extension, placed in `out_dir` if given and next to the input otherwise.
pub fn otf_path(input: &Path, out_dir: Option<&Path>) -> PathBuf {
    let path = match (out_dir, input.file_name()) {
        (Some(dir), Some(name)) => dir.join(name),
        _ => input.to_path_buf(),
    };
    path.with_extension(OTF_EXTENSION)
}

/// Convert one WOFF file to an OTF file.
pub fn convert_file(transcoder: &Transcoder, input: &Path, output: &Path) -> Result<()> {
    let woff = FontFile::new(input).read()?;
    let otf = transcoder
        .convert(&woff)
        .with_context(|| format!("Failed to convert {}", input.display()))?;
    FontFile::new(output).write(&otf)?;

    info!("{} -> {} ({} bytes)", input.display(), output.display(), otf.len());
    Ok(())
}

/// Convert the given files.
///
/// `output` names the destination of a single input; otherwise each output
/// path comes from [`otf_path`]. Several inputs are converted in parallel.
pub fn convert_files(
    transcoder: &Transcoder,
    inputs: &[PathBuf],
    output: Option<&Path>,
    out_dir: Option<&Path>,
) -> Result<()> {
    match (inputs, output) {
        ([input], Some(output)) => convert_file(transcoder, input, output),
        (_, Some(_)) => bail!("--output requires exactly one input, got {}", inputs.len()),
        ([input], None) => convert_file(transcoder, input, &otf_path(input, out_dir)),
        _ => run_parallel("Convert", inputs, |input| {
            convert_file(transcoder, input, &otf_path(input, out_dir))
        })
        .ok_or_bail("Convert"),
    }
}

/// Convert every file in `dir` matching `pattern` in parallel.
pub fn convert_dir(
    transcoder: &Transcoder,
    dir: &Path,
    pattern: &str,
    out_dir: Option<&Path>,
) -> Result<BatchResult> {
    let inputs = glob_fonts(dir, pattern)?;
    if inputs.is_empty() {
        bail!("No files matching {pattern} in {}", dir.display());
    }
    info!("Converting {} files from {}", inputs.len(), dir.display());

    let result = run_parallel("Convert", &inputs, |input| {
        convert_file(transcoder, input, &otf_path(input, out_dir))
    });
    result.ok_or_bail("Convert")?;
    Ok(result)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;
    use typelift_woff::Options;

    use super::*;
    use crate::testing::stored_woff;

    #[test]
    fn test_otf_path() {
        assert_eq!(otf_path(Path::new("fonts/a.woff"), None), PathBuf::from("fonts/a.otf"));
        assert_eq!(
            otf_path(Path::new("fonts/a.woff"), Some(Path::new("out"))),
            PathBuf::from("out/a.otf")
        );
        assert_eq!(otf_path(Path::new("noext"), None), PathBuf::from("noext.otf"));
    }

    #[test]
    fn test_convert_file() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("font.woff");
        fs::write(&input, stored_woff(b"head", b"abcdef")).unwrap();

        let output = otf_path(&input, None);
        convert_file(&Transcoder::default(), &input, &output).unwrap();

        let otf = fs::read(&output).unwrap();
        assert_eq!(otf.len(), 12 + 16 + 8);
        assert_eq!(&otf[..4], b"OTTO");
        assert_eq!(&otf[12..16], b"head");
        assert_eq!(&otf[28..34], b"abcdef");
    }

    #[test]
    fn test_convert_file_reports_input() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("broken.woff");
        fs::write(&input, b"wOFF").unwrap();

        let err = convert_file(&Transcoder::default(), &input, &dir.path().join("x.otf"))
            .unwrap_err();
        assert!(format!("{err}").contains("broken.woff"));
        assert!(!dir.path().join("x.otf").exists());
    }

    #[test]
    fn test_output_requires_single_input() {
        let inputs = vec![PathBuf::from("a.woff"), PathBuf::from("b.woff")];
        let result =
            convert_files(&Transcoder::default(), &inputs, Some(Path::new("out.otf")), None);
        assert!(result.is_err());
    }

    #[test]
    fn test_convert_dir() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("out");
        for (i, name) in ["one.woff", "two.woff", "three.woff"].iter().enumerate() {
            fs::write(dir.path().join(name), stored_woff(b"glyf", &vec![i as u8; 5])).unwrap();
        }
        fs::write(dir.path().join("notes.txt"), b"ignored").unwrap();

        let transcoder = Transcoder::new(Options::new().verbose(true));
        let result = convert_dir(&transcoder, dir.path(), "*.woff", Some(out.as_path())).unwrap();

        assert_eq!(result.succeeded, 3);
        for name in ["one.otf", "two.otf", "three.otf"] {
            assert_eq!(fs::read(out.join(name)).unwrap().len(), 12 + 16 + 8);
        }
    }

    #[test]
    fn test_convert_dir_fails_on_bad_file() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("good.woff"), stored_woff(b"head", b"ok")).unwrap();
        fs::write(dir.path().join("bad.woff"), b"too short").unwrap();

        let result = convert_dir(&Transcoder::default(), dir.path(), "*.woff", None);
        assert!(result.is_err());
        assert!(dir.path().join("good.otf").exists());
    }

    #[test]
    fn test_convert_dir_without_matches() {
        let dir = tempdir().unwrap();
        assert!(convert_dir(&Transcoder::default(), dir.path(), "*.woff", None).is_err());
    }
}
