//! The user's ffmpeg command line.
//!
//! Arguments are passed to ffmpeg untouched. Only two of them are
//! interpreted: the value after the first `-i` (the input that is probed for
//! its frame count) and the last argument (the output file).

use crate::error::{CoreError, CoreResult};
use std::path::{Path, PathBuf};

/// Output names that do not create a file.
const NULL_SINKS: [&str; 4] = ["/dev/null", "NUL", "nul", "-"];

/// Output names under which ffmpeg writes the media to its own stdout.
const STDOUT_SINKS: [&str; 4] = ["-", "pipe:", "pipe:1", "/dev/stdout"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncoderInvocation {
    args: Vec<String>,
    input: PathBuf,
    output: PathBuf,
}

impl EncoderInvocation {
    /// Locates the input and output in an ffmpeg argument list.
    ///
    /// # Errors
    ///
    /// [`CoreError::InvalidInvocation`] when there is no `-i`, nothing after
    /// it, or no argument left over for the output.
    pub fn from_args(args: Vec<String>) -> CoreResult<Self> {
        if args.is_empty() {
            return Err(CoreError::InvalidInvocation(
                "no ffmpeg arguments given".to_string(),
            ));
        }

        let flag_pos = args.iter().position(|a| a == "-i").ok_or_else(|| {
            CoreError::InvalidInvocation("no input given, expected `-i <input>`".to_string())
        })?;
        let input = args.get(flag_pos + 1).ok_or_else(|| {
            CoreError::InvalidInvocation("`-i` must be followed by an input".to_string())
        })?;

        // The output must come after the input value.
        if args.len() <= flag_pos + 2 {
            return Err(CoreError::InvalidInvocation(
                "no output given, the last argument must be the output file".to_string(),
            ));
        }
        let output = &args[args.len() - 1];

        Ok(Self {
            input: PathBuf::from(input),
            output: PathBuf::from(output),
            args,
        })
    }

    /// Every argument, in order, as given to ffmpeg.
    #[must_use]
    pub fn args(&self) -> &[String] {
        &self.args
    }

    #[must_use]
    pub fn input(&self) -> &Path {
        &self.input
    }

    #[must_use]
    pub fn output(&self) -> &Path {
        &self.output
    }

    /// Whether the output goes somewhere other than a regular file.
    #[must_use]
    pub fn output_is_null_sink(&self) -> bool {
        let output = self.output.to_string_lossy();
        NULL_SINKS.contains(&output.as_ref()) || output.starts_with("pipe:")
    }

    /// Whether ffmpeg writes the media to stdout, which then must carry
    /// nothing else.
    #[must_use]
    pub fn output_is_stdout(&self) -> bool {
        STDOUT_SINKS.contains(&self.output.to_string_lossy().as_ref())
    }

    /// Whether the input names a local file (as opposed to a URL).
    #[must_use]
    pub fn input_is_local_file(&self) -> bool {
        !self.input.to_string_lossy().contains("://")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(line: &str) -> Vec<String> {
        line.split_whitespace().map(str::to_string).collect()
    }

    #[test]
    fn test_finds_input_and_output() {
        let inv = EncoderInvocation::from_args(args("-y -i in.mkv -c:v libx264 -crf 20 out.mp4")).unwrap();
        assert_eq!(inv.input(), Path::new("in.mkv"));
        assert_eq!(inv.output(), Path::new("out.mp4"));
        assert_eq!(inv.args().len(), 8);
        assert!(!inv.output_is_null_sink());
        assert!(inv.input_is_local_file());
    }

    #[test]
    fn test_uses_first_input() {
        let inv = EncoderInvocation::from_args(args("-i a.mkv -i b.srt -map 0 -map 1 out.mkv")).unwrap();
        assert_eq!(inv.input(), Path::new("a.mkv"));
    }

    #[test]
    fn test_rejects_incomplete_invocations() {
        for line in ["", "in.mkv out.mp4", "-y -i", "-i in.mkv"] {
            let err = EncoderInvocation::from_args(args(line)).unwrap_err();
            assert!(matches!(err, CoreError::InvalidInvocation(_)), "{line:?}");
        }
    }

    #[test]
    fn test_null_sinks_and_urls() {
        let inv = EncoderInvocation::from_args(args("-i https://example.com/a.m3u8 -f null /dev/null")).unwrap();
        assert!(inv.output_is_null_sink());
        assert!(!inv.input_is_local_file());

        let inv = EncoderInvocation::from_args(args("-i in.mkv -f matroska pipe:1")).unwrap();
        assert!(inv.output_is_null_sink());
    }

    #[test]
    fn test_stdout_outputs() {
        for output in ["-", "pipe:", "pipe:1", "/dev/stdout"] {
            let inv = EncoderInvocation::from_args(args(&format!("-i in.mkv -f matroska {output}"))).unwrap();
            assert!(inv.output_is_stdout(), "{output}");
        }
        for output in ["out.mkv", "pipe:3", "/dev/null"] {
            let inv = EncoderInvocation::from_args(args(&format!("-i in.mkv -f matroska {output}"))).unwrap();
            assert!(!inv.output_is_stdout(), "{output}");
        }
    }
}
