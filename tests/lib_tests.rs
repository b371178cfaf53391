use cac::engine::{
    CommandTemplate, classify, copy_file, find_program, is_eligible, normalize_extension,
    output_path_for, parse_extension_list, render, run_command, same_file,
};
use cac::{
    ConfigError, Decision, ExecutionError, FileCandidate, FileError, JobConfig, Outcome,
    RunSummary, TemplateError,
};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

fn candidate(path: &str) -> FileCandidate {
    FileCandidate::new(PathBuf::from(path))
}

fn config_with(sources: &[&str], except: &[&str]) -> JobConfig {
    JobConfig {
        target_ext: ".mp3".to_string(),
        sources: sources.iter().map(|s| s.to_string()).collect(),
        except: except.iter().map(|s| s.to_string()).collect(),
        ..Default::default()
    }
}

fn os(args: &[&str]) -> Vec<OsString> {
    args.iter().map(OsString::from).collect()
}

// --- FileCandidate ---

#[test]
fn test_candidate_extension_and_stem() {
    let c = candidate("/music/song.wav");
    assert_eq!(c.name, "song.wav");
    assert_eq!(c.ext, ".wav");
    assert_eq!(c.stem(), "song");
}

#[test]
fn test_candidate_last_extension_only() {
    let c = candidate("/music/live.2020.flac");
    assert_eq!(c.ext, ".flac");
    assert_eq!(c.stem(), "live.2020");
}

#[test]
fn test_candidate_without_extension() {
    let c = candidate("/music/README");
    assert_eq!(c.ext, "");
    assert_eq!(c.stem(), "README");
}

#[test]
fn test_candidate_dotfile_has_no_extension() {
    let c = candidate("/music/.hidden");
    assert_eq!(c.ext, "");
    assert_eq!(c.stem(), ".hidden");
}

#[cfg(unix)]
#[test]
fn test_candidate_non_utf8_name_kept_exact() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let e_acute = candidate_from_bytes(b"/in/caf\xe9.mp3");
    let e_grave = candidate_from_bytes(b"/in/caf\xe8.mp3");
    assert_eq!(e_acute.stem(), OsStr::from_bytes(b"caf\xe9"));
    assert_eq!(e_acute.ext, ".mp3");

    let out = Path::new("/out");
    let a = output_path_for(&e_acute, out, ".mp3");
    let b = output_path_for(&e_grave, out, ".mp3");
    assert_ne!(a, b);
    assert_eq!(a.file_name(), Some(OsStr::from_bytes(b"caf\xe9.mp3")));

    let config = config_with(&[], &[]);
    assert_eq!(classify(&e_acute, &config), Decision::Relocate);
}

#[cfg(unix)]
#[test]
fn test_candidate_non_utf8_extension_matches_by_bytes() {
    let c = candidate_from_bytes(b"/in/track.w\xe4v");
    let config = config_with(&[".wav"], &[]);
    assert_eq!(classify(&c, &config), Decision::Skip);
    let config = config_with(&[], &[".wav"]);
    assert_eq!(classify(&c, &config), Decision::Convert);
}

#[cfg(unix)]
fn candidate_from_bytes(bytes: &[u8]) -> FileCandidate {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;
    FileCandidate::new(PathBuf::from(OsStr::from_bytes(bytes)))
}

// --- extension normalization ---

#[test]
fn test_normalize_extension() {
    assert_eq!(normalize_extension("mp3"), Some(".mp3".to_string()));
    assert_eq!(normalize_extension(" .opus "), Some(".opus".to_string()));
    assert_eq!(normalize_extension(""), None);
    assert_eq!(normalize_extension("  "), None);
    assert_eq!(normalize_extension("."), None);
}

#[test]
fn test_parse_extension_list_splits_commas() {
    let items = vec!["wav, .flac".to_string(), "".to_string(), "ogg".to_string()];
    assert_eq!(parse_extension_list(&items), vec![".wav", ".flac", ".ogg"]);
}

#[test]
fn test_config_normalized() {
    let config = JobConfig {
        target_ext: "opus".to_string(),
        sources: vec!["wav,flac".to_string()],
        except: vec![" txt ".to_string()],
        ..Default::default()
    }
    .normalized()
    .unwrap();
    assert_eq!(config.target_ext, ".opus");
    assert_eq!(config.sources, vec![".wav", ".flac"]);
    assert_eq!(config.except, vec![".txt"]);
}

#[test]
fn test_config_empty_target_rejected() {
    let config = JobConfig {
        target_ext: " ".to_string(),
        ..Default::default()
    };
    assert!(matches!(config.normalized(), Err(ConfigError::EmptyTarget)));
}

// --- classify ---

#[test]
fn test_classify_no_filters() {
    let config = config_with(&[], &[]);
    assert_eq!(classify(&candidate("a.wav"), &config), Decision::Convert);
    assert_eq!(classify(&candidate("b.mp3"), &config), Decision::Relocate);
    assert_eq!(classify(&candidate("c.txt"), &config), Decision::Convert);
    assert_eq!(classify(&candidate("README"), &config), Decision::Convert);
}

#[test]
fn test_classify_allow_list_never_skips_members() {
    let allowed = [".wav", ".mp3", ".flac"];
    let config = config_with(&allowed, &[]);
    for ext in allowed {
        let c = candidate(&format!("track{ext}"));
        assert_ne!(classify(&c, &config), Decision::Skip, "{ext}");
        assert!(is_eligible(&c, &config));
    }
    assert_eq!(classify(&candidate("c.txt"), &config), Decision::Skip);
    assert_eq!(classify(&candidate("README"), &config), Decision::Skip);
}

#[test]
fn test_classify_deny_list_always_skips_members() {
    let denied = [".txt", ".jpg", ".mp3"];
    let config = config_with(&[], &denied);
    for ext in denied {
        assert_eq!(
            classify(&candidate(&format!("file{ext}")), &config),
            Decision::Skip,
            "{ext}"
        );
    }
    assert_eq!(classify(&candidate("a.wav"), &config), Decision::Convert);
}

#[test]
fn test_classify_allow_list_wins_over_deny_list() {
    let config = config_with(&[".opus"], &[".txt", ".opus"]);
    assert_eq!(classify(&candidate("song.opus"), &config), Decision::Convert);
    assert_eq!(classify(&candidate("note.txt"), &config), Decision::Skip);
    assert_eq!(classify(&candidate("clip.mp3"), &config), Decision::Skip);
}

#[test]
fn test_classify_is_case_sensitive() {
    let config = config_with(&[], &[]);
    assert_eq!(classify(&candidate("LOUD.MP3"), &config), Decision::Convert);
}

#[test]
fn test_classify_deterministic() {
    let config = config_with(&[".wav", ".mp3"], &[".txt"]);
    for path in ["a.wav", "b.mp3", "c.txt", "d", "e.flac"] {
        let c = candidate(path);
        let first = classify(&c, &config);
        for _ in 0..10 {
            assert_eq!(classify(&c, &config), first);
        }
    }
}

// --- output paths ---

#[test]
fn test_output_path_for() {
    let out = Path::new("/out");
    assert_eq!(
        output_path_for(&candidate("/in/sub/song.wav"), out, ".mp3"),
        PathBuf::from("/out/song.mp3")
    );
    assert_eq!(
        output_path_for(&candidate("/in/README"), out, ".mp3"),
        PathBuf::from("/out/README.mp3")
    );
}

#[test]
fn test_same_file() {
    let dir = tempfile::TempDir::new().unwrap();
    let file = dir.path().join("a.mp3");
    std::fs::write(&file, b"x").unwrap();
    assert!(same_file(&file, &file));
    assert!(same_file(&file, &dir.path().join(".").join("a.mp3")));
    assert!(!same_file(&file, &dir.path().join("b.mp3")));
}

// --- command template ---

#[test]
fn test_render_default_template_with_spaces() {
    let argv = render(
        cac::utils::DEFAULT_COMMAND,
        Path::new("/music/my song.wav"),
        Path::new("/out/my song.mp3"),
    )
    .unwrap();
    assert_eq!(
        argv,
        os(&["ffmpeg", "-y", "-i", "/music/my song.wav", "/out/my song.mp3"])
    );
}

#[test]
fn test_render_paths_with_quotes_stay_one_argument() {
    let argv = render(
        "tool {{ .InputFile }} {{ .OutputFile }}",
        Path::new("it's \"live\".wav"),
        Path::new("out dir/it's.mp3"),
    )
    .unwrap();
    assert_eq!(argv, os(&["tool", "it's \"live\".wav", "out dir/it's.mp3"]));
}

#[test]
fn test_render_placeholder_inside_word() {
    let argv = render(
        "enc --in={{.InputFile}} -o '{{ .OutputFile }}.part'",
        Path::new("a.wav"),
        Path::new("b.mp3"),
    )
    .unwrap();
    assert_eq!(argv, os(&["enc", "--in=a.wav", "-o", "b.mp3.part"]));
}

#[test]
fn test_split_quotes_and_escapes() {
    let t = CommandTemplate::parse(r#"echo 'a b' c\ d "e\"f" "" x"#).unwrap();
    assert_eq!(
        t.render(Path::new("i"), Path::new("o")),
        os(&["echo", "a b", "c d", "e\"f", "", "x"])
    );
}

#[test]
fn test_program() {
    let t = CommandTemplate::parse(cac::utils::DEFAULT_COMMAND).unwrap();
    assert_eq!(t.program(), Some("ffmpeg".to_string()));
    let t = CommandTemplate::parse("{{ .InputFile }} --run").unwrap();
    assert_eq!(t.program(), None);
}

#[test]
fn test_template_errors() {
    assert_eq!(CommandTemplate::parse(""), Err(TemplateError::Empty));
    assert_eq!(CommandTemplate::parse("   "), Err(TemplateError::Empty));
    assert_eq!(
        CommandTemplate::parse("ffmpeg -i {{ .Input }}"),
        Err(TemplateError::UnknownPlaceholder(".Input".to_string()))
    );
    assert_eq!(
        CommandTemplate::parse("ffmpeg -i {{ .InputFile"),
        Err(TemplateError::UnclosedPlaceholder(10))
    );
    assert_eq!(
        CommandTemplate::parse("ffmpeg -i \"{{ .InputFile }}"),
        Err(TemplateError::UnterminatedQuote('"'))
    );
    assert_eq!(
        CommandTemplate::parse("ffmpeg \\"),
        Err(TemplateError::TrailingEscape)
    );
}

// --- executor primitives ---

#[test]
fn test_copy_file_rejects_directory() {
    let dir = tempfile::TempDir::new().unwrap();
    let err = copy_file(dir.path(), &dir.path().join("copy")).unwrap_err();
    assert!(matches!(err, ExecutionError::NotRegularFile { .. }));
}

#[test]
fn test_copy_file_copies_content() {
    let dir = tempfile::TempDir::new().unwrap();
    let src = dir.path().join("a.mp3");
    let dst = dir.path().join("b.mp3");
    std::fs::write(&src, b"audio").unwrap();
    assert_eq!(copy_file(&src, &dst).unwrap(), 5);
    assert_eq!(std::fs::read(&dst).unwrap(), b"audio");
}

#[cfg(unix)]
#[test]
fn test_run_command_exit_status() {
    assert!(run_command(&os(&["true"]), true).is_ok());
    let err = run_command(&os(&["false"]), true).unwrap_err();
    assert!(matches!(err, ExecutionError::ExitStatus { .. }));
}

#[cfg(unix)]
#[test]
fn test_run_command_captures_stderr_tail_when_quiet() {
    let err = run_command(&os(&["sh", "-c", "echo first >&2; echo boom >&2; exit 3"]), true)
        .unwrap_err();
    match err {
        ExecutionError::ExitStatus { stderr, .. } => assert_eq!(stderr.as_deref(), Some("boom")),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_run_command_missing_program() {
    let err = run_command(&os(&["cac-no-such-program-here"]), true).unwrap_err();
    assert!(matches!(err, ExecutionError::Spawn { .. }));
}

#[cfg(unix)]
#[test]
fn test_find_program() {
    assert!(find_program("sh").is_some());
    assert!(find_program("cac-no-such-program-here").is_none());
    assert!(find_program("/bin/sh").is_some());
}

// --- summary ---

#[test]
fn test_summary_counts_and_failures() {
    let mut summary = RunSummary::default();
    summary.record(PathBuf::from("a.wav"), Outcome::Converted);
    summary.record(PathBuf::from("b.mp3"), Outcome::Relocated);
    summary.record(PathBuf::from("c.txt"), Outcome::Skipped);
    summary.record(
        PathBuf::from("d.wav"),
        Outcome::Failed(FileError::Template(TemplateError::Empty)),
    );
    summary.record(
        PathBuf::from("e"),
        Outcome::Failed(FileError::Traversal("permission denied".to_string())),
    );

    assert_eq!(summary.converted, 1);
    assert_eq!(summary.relocated, 1);
    assert_eq!(summary.skipped, 1);
    assert_eq!(summary.failed, 2);
    assert_eq!(summary.total(), 5);
    assert!(!summary.is_success());
    assert_eq!(summary.failures[0].path, PathBuf::from("d.wav"));
    assert_eq!(summary.failures[0].kind, "template");
    assert_eq!(
        summary.failures[0].message,
        "invalid command template: command template is empty"
    );
    assert_eq!(summary.failures[1].kind, "traversal");
}

#[test]
fn test_summary_json_shape() {
    let mut summary = RunSummary::default();
    summary.record(PathBuf::from("a.wav"), Outcome::Converted);
    let value = serde_json::to_value(&summary).unwrap();
    assert_eq!(value["converted"], 1);
    assert_eq!(value["failed"], 0);
    assert!(value["failures"].as_array().unwrap().is_empty());
}
