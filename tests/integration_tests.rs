//! Integration tests for srt-translate
//!
//! These drive the whole pipeline over temporary directories with an
//! in-process translator, so no API key is required.

use async_trait::async_trait;
use srt_translate::pipeline::{process_file, translate_file};
use srt_translate::translate::{RequestPacing, Translator};
use srt_translate::{
    run, NoProgress, PipelineConfig, ProgressObserver, SourceFile, SrtTranslateError,
};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

// ============================================================================
// Helpers
// ============================================================================

/// Word-swapping translator that records every request.
#[derive(Default)]
struct FakeTranslator {
    /// Zero-based request indices that fail.
    fail_on: Vec<usize>,
    /// Reply with this text instead of translating.
    fixed_reply: Option<String>,
    /// Mangle timing lines the way real services do.
    mangle_timestamps: bool,
    calls: Mutex<Vec<String>>,
}

impl FakeTranslator {
    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Translator for FakeTranslator {
    async fn translate(&self, text: &str, target_lang: &str) -> srt_translate::Result<String> {
        assert_eq!(target_lang, "nl");
        let index = {
            let mut calls = self.calls.lock().unwrap();
            calls.push(text.to_string());
            calls.len() - 1
        };

        if self.fail_on.contains(&index) {
            return Err(SrtTranslateError::Api(format!("request {} timed out", index)));
        }
        if let Some(ref reply) = self.fixed_reply {
            return Ok(reply.clone());
        }

        let mut out = text
            .replace("Hello", "Hallo")
            .replace("Goodbye", "Tot ziens")
            .trim_end()
            .to_string();
        if self.mangle_timestamps {
            out = out.replace(" --> ", "->").replace(':', " : ");
        }
        Ok(out)
    }

    fn name(&self) -> &'static str {
        "fake"
    }
}

fn test_config(chunk_size: usize) -> PipelineConfig {
    PipelineConfig {
        chunk_size,
        pacing: RequestPacing::none(),
        ..PipelineConfig::default()
    }
}

fn cue(index: usize, text: &str) -> String {
    format!(
        "{}\n00:00:{:02},000 --> 00:00:{:02},500\n{}\n\n",
        index, index, index, text
    )
}

fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, content).unwrap();
    path
}

// ============================================================================
// End-to-end scenarios
// ============================================================================

mod pipeline_tests {
    use super::*;

    #[tokio::test]
    async fn test_single_chunk_file() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "movie.en.srt",
            "1\n00:00:01,000 --> 00:00:02,000\nHello\n",
        );
        let reply = "1\n00:00:01,000 --> 00:00:02,000\nHallo\n";
        let translator = FakeTranslator {
            fixed_reply: Some(reply.to_string()),
            ..Default::default()
        };

        let summary = run(dir.path(), &translator, &test_config(100), &NoProgress)
            .await
            .unwrap();

        assert_eq!(
            translator.calls(),
            vec!["1\n00:00:01,000 --> 00:00:02,000\nHello\n".to_string()]
        );
        assert_eq!(summary.files.len(), 1);
        let report = &summary.files[0];
        assert_eq!(report.published, dir.path().join("movie.nld.srt"));
        assert_eq!(report.total_lines, 3);
        assert_eq!(report.chunks_translated, 1);
        assert_eq!(report.chunks_dropped, 0);
        assert_eq!(fs::read_to_string(&report.published).unwrap(), reply);
    }

    #[tokio::test]
    async fn test_plain_srt_name() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "movie.srt", &cue(1, "Hello"));
        let translator = FakeTranslator::default();

        run(dir.path(), &translator, &test_config(100), &NoProgress)
            .await
            .unwrap();

        assert_eq!(
            fs::read_to_string(dir.path().join("movie.nld.srt")).unwrap(),
            cue(1, "Hallo")
        );
    }

    #[tokio::test]
    async fn test_multi_chunk_file_is_reassembled_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let source: String = (1..=5).map(|i| cue(i, &format!("Hello {}", i))).collect();
        write(dir.path(), "show.en.srt", &source);
        let translator = FakeTranslator::default();

        // 20 lines in windows of 6: four requests, boundaries mid-cue.
        let summary = run(dir.path(), &translator, &test_config(6), &NoProgress)
            .await
            .unwrap();

        let calls = translator.calls();
        assert_eq!(calls.len(), 4);
        assert!(calls[0].ends_with("2\n00:00:02,000 --> 00:00:02,500\n"));
        assert_eq!(summary.files[0].chunks_translated, 4);
        let expected: String = (1..=5).map(|i| cue(i, &format!("Hallo {}", i))).collect();
        assert_eq!(
            fs::read_to_string(dir.path().join("show.nld.srt")).unwrap(),
            expected
        );
    }

    #[tokio::test]
    async fn test_failed_chunk_is_left_out() {
        let dir = tempfile::tempdir().unwrap();
        let source = format!(
            "{}{}{}",
            cue(1, "Hello one"),
            cue(2, "Hello two"),
            cue(3, "Hello three")
        );
        write(dir.path(), "movie.en.srt", &source);
        let translator = FakeTranslator {
            fail_on: vec![1],
            ..Default::default()
        };

        let summary = run(dir.path(), &translator, &test_config(4), &NoProgress)
            .await
            .unwrap();

        assert_eq!(translator.calls().len(), 3);
        assert_eq!(summary.files[0].chunks_translated, 2);
        assert_eq!(summary.files[0].chunks_dropped, 1);
        assert_eq!(summary.chunks_dropped(), 1);

        let published = fs::read_to_string(dir.path().join("movie.nld.srt")).unwrap();
        assert_eq!(
            published,
            format!("{}{}", cue(1, "Hallo one"), cue(3, "Hallo three"))
        );
        assert!(!published.contains("two"));
    }

    #[tokio::test]
    async fn test_all_chunks_failing_publishes_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "movie.srt", &cue(1, "Hello"));
        let translator = FakeTranslator {
            fail_on: vec![0],
            ..Default::default()
        };

        run(dir.path(), &translator, &test_config(100), &NoProgress)
            .await
            .unwrap();

        assert_eq!(
            fs::read_to_string(dir.path().join("movie.nld.srt")).unwrap(),
            ""
        );
    }

    #[tokio::test]
    async fn test_mangled_timestamps_are_normalized() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "movie.en.srt",
            &format!("{}{}", cue(1, "Hello"), cue(2, "Goodbye")),
        );
        let translator = FakeTranslator {
            mangle_timestamps: true,
            ..Default::default()
        };

        run(dir.path(), &translator, &test_config(100), &NoProgress)
            .await
            .unwrap();

        assert_eq!(
            fs::read_to_string(dir.path().join("movie.nld.srt")).unwrap(),
            format!("{}{}", cue(1, "Hallo"), cue(2, "Tot ziens"))
        );
    }

    #[tokio::test]
    async fn test_blank_chunks_are_not_sent() {
        let dir = tempfile::tempdir().unwrap();
        let source = format!("{}\n\n\n\n{}", cue(1, "Hello"), cue(2, "Goodbye"));
        // Lines 0..4 are cue 1, lines 4..8 are blank, lines 8..12 are cue 2.
        write(dir.path(), "movie.srt", &source);
        let translator = FakeTranslator::default();

        let summary = run(dir.path(), &translator, &test_config(4), &NoProgress)
            .await
            .unwrap();

        assert_eq!(translator.calls().len(), 2);
        assert_eq!(summary.files[0].chunks_skipped, 1);
        assert_eq!(
            fs::read_to_string(dir.path().join("movie.nld.srt")).unwrap(),
            format!("{}{}", cue(1, "Hallo"), cue(2, "Tot ziens"))
        );
    }

    #[tokio::test]
    async fn test_empty_file_publishes_empty_output() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "empty.en.srt", "");
        let translator = FakeTranslator::default();

        let summary = run(dir.path(), &translator, &test_config(100), &NoProgress)
            .await
            .unwrap();

        assert!(translator.calls().is_empty());
        assert_eq!(summary.files[0].total_lines, 0);
        assert_eq!(
            fs::read_to_string(dir.path().join("empty.nld.srt")).unwrap(),
            ""
        );
    }
}

// ============================================================================
// Multi-file runs
// ============================================================================

mod run_tests {
    use super::*;

    #[tokio::test]
    async fn test_each_file_gets_its_own_output() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "a.en.srt", &cue(1, "Hello Alpha"));
        write(dir.path(), "season1/b.srt", &cue(1, "Hello Beta"));
        let translator = FakeTranslator::default();

        let summary = run(dir.path(), &translator, &test_config(100), &NoProgress)
            .await
            .unwrap();
        assert_eq!(summary.files.len(), 2);

        let a = fs::read_to_string(dir.path().join("a.nld.srt")).unwrap();
        let b = fs::read_to_string(dir.path().join("season1/b.nld.srt")).unwrap();
        assert_eq!(a, cue(1, "Hallo Alpha"));
        assert_eq!(b, cue(1, "Hallo Beta"));
        assert!(!b.contains("Alpha"));
    }

    #[tokio::test]
    async fn test_rerun_skips_published_files() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "movie.en.srt", &cue(1, "Hello"));

        let first = FakeTranslator::default();
        run(dir.path(), &first, &test_config(100), &NoProgress)
            .await
            .unwrap();
        let second = FakeTranslator::default();
        let summary = run(dir.path(), &second, &test_config(100), &NoProgress)
            .await
            .unwrap();

        assert_eq!(first.calls().len(), 1);
        assert_eq!(second.calls().len(), 1);
        assert_eq!(summary.files.len(), 1);
        assert!(!dir.path().join("movie.nld.nld.srt").exists());
    }

    #[tokio::test]
    async fn test_english_only() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "a.en.srt", &cue(1, "Hello"));
        write(dir.path(), "b.srt", &cue(1, "Hello"));
        let translator = FakeTranslator::default();
        let config = PipelineConfig {
            english_only: true,
            ..test_config(100)
        };

        let summary = run(dir.path(), &translator, &config, &NoProgress)
            .await
            .unwrap();

        assert_eq!(summary.files.len(), 1);
        assert!(dir.path().join("a.nld.srt").exists());
        assert!(!dir.path().join("b.nld.srt").exists());
    }

    #[tokio::test]
    async fn test_missing_directory_aborts() {
        let dir = tempfile::tempdir().unwrap();
        let translator = FakeTranslator::default();

        let err = run(
            &dir.path().join("nope"),
            &translator,
            &test_config(100),
            &NoProgress,
        )
        .await
        .unwrap_err();

        assert!(matches!(err, SrtTranslateError::SourceDirectoryNotFound(_)));
        assert!(translator.calls().is_empty());
    }

    #[tokio::test]
    async fn test_empty_directory() {
        let dir = tempfile::tempdir().unwrap();
        let translator = FakeTranslator::default();

        let summary = run(dir.path(), &translator, &test_config(100), &NoProgress)
            .await
            .unwrap();

        assert!(summary.files.is_empty());
    }
}

// ============================================================================
// Progress and pacing
// ============================================================================

mod progress_tests {
    use super::*;
    use std::time::{Duration, Instant};

    #[derive(Default)]
    struct Recorder {
        events: Mutex<Vec<String>>,
        percents: Mutex<Vec<f64>>,
    }

    impl ProgressObserver for Recorder {
        fn on_file_start(&self, _path: &Path, total_lines: usize) {
            self.events
                .lock()
                .unwrap()
                .push(format!("start {}", total_lines));
        }

        fn on_progress(&self, _path: &Path, percent: f64) {
            self.percents.lock().unwrap().push(percent);
        }

        fn on_file_done(&self, _path: &Path, published: &Path) {
            self.events.lock().unwrap().push(format!(
                "done {}",
                published.file_name().unwrap().to_string_lossy()
            ));
        }
    }

    #[tokio::test]
    async fn test_progress_reaches_100() {
        let dir = tempfile::tempdir().unwrap();
        let source: String = (1..=5).map(|i| cue(i, "Hello")).collect();
        let path = write(dir.path(), "movie.srt", &source);
        let translator = FakeTranslator::default();
        let recorder = Recorder::default();

        process_file(&path, &translator, &test_config(8), &recorder)
            .await
            .unwrap();

        assert_eq!(
            *recorder.events.lock().unwrap(),
            vec!["start 20".to_string(), "done movie.nld.srt".to_string()]
        );
        assert_eq!(*recorder.percents.lock().unwrap(), vec![40.0, 80.0, 100.0]);
    }

    #[tokio::test]
    async fn test_first_request_is_paced() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "movie.srt", &format!("{}{}", cue(1, "Hello"), cue(2, "Hi")));
        let source = SourceFile::read(&path).unwrap();
        let translator = FakeTranslator::default();
        let config = PipelineConfig {
            chunk_size: 4,
            pacing: RequestPacing {
                first_request_delay: Duration::from_millis(50),
                between_requests: Duration::ZERO,
            },
            ..PipelineConfig::default()
        };

        let started = Instant::now();
        let artifact = translate_file(&source, &translator, &config, &NoProgress).await;

        assert!(started.elapsed() >= Duration::from_millis(50));
        assert_eq!(artifact.appended_chunks(), 2);
        assert_eq!(translator.calls().len(), 2);
    }

    #[tokio::test]
    async fn test_blank_first_chunk_skips_first_delay() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "movie.srt", &format!("\n\n{}", cue(1, "Hello")));
        let source = SourceFile::read(&path).unwrap();
        let translator = FakeTranslator::default();
        let config = PipelineConfig {
            chunk_size: 2,
            pacing: RequestPacing {
                first_request_delay: Duration::from_secs(5),
                between_requests: Duration::ZERO,
            },
            ..PipelineConfig::default()
        };

        let started = Instant::now();
        let artifact = translate_file(&source, &translator, &config, &NoProgress).await;

        assert!(started.elapsed() < Duration::from_secs(5));
        assert_eq!(artifact.skipped_chunks(), 1);
        assert_eq!(artifact.appended_chunks(), 2);
        assert_eq!(translator.calls().len(), 2);
    }
}
