//! Cross-run behavior of the incremental builder against a real cache directory.

use std::cell::RefCell;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use society_analysis::{Analyzer, AnalyzerError, BuildError, IncrementalBuilder};
use society_cache::FileCache;
use society_common::ClassFact;
use walkdir::WalkDir;

/// Emits one fact per `class <Name>` line and records every batch it sees.
#[derive(Default)]
struct LineAnalyzer {
    batches: RefCell<Vec<Vec<PathBuf>>>,
    fail: bool,
    stray: bool,
}

impl LineAnalyzer {
    fn scan(label: &str, source: &str) -> Vec<ClassFact> {
        source
            .lines()
            .enumerate()
            .filter_map(|(i, line)| {
                let name = line.trim().strip_prefix("class ")?;
                Some(ClassFact::new(name.trim(), format!("{label}:{}", i + 1)))
            })
            .collect()
    }

    fn batch_count(&self) -> usize {
        self.batches.borrow().len()
    }
}

impl Analyzer for LineAnalyzer {
    fn analyze(&self, paths: &[PathBuf]) -> Result<Vec<ClassFact>, AnalyzerError> {
        self.batches.borrow_mut().push(paths.to_vec());
        if self.fail {
            return Err("syntax error".into());
        }
        let mut facts = Vec::new();
        for path in paths {
            let source = std::fs::read_to_string(path)?;
            facts.extend(Self::scan(&path.display().to_string(), &source));
        }
        if self.stray {
            facts.push(ClassFact::new("Ghost", "elsewhere.rb:1"));
        }
        Ok(facts)
    }

    fn analyze_source(&self, label: &str, source: &str) -> Result<Vec<ClassFact>, AnalyzerError> {
        Ok(Self::scan(label, source))
    }
}

struct Project {
    _dir: tempfile::TempDir,
    src: PathBuf,
    cache: PathBuf,
}

impl Project {
    fn new(files: &[(&str, &str)]) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("app");
        for (name, body) in files {
            let path = src.join(name);
            std::fs::create_dir_all(path.parent().unwrap()).unwrap();
            std::fs::write(path, body).unwrap();
        }
        let cache = dir.path().join("doc/society/cache");
        Self {
            _dir: dir,
            src,
            cache,
        }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.src.join(name)
    }

    fn builder(&self, analyzer: LineAnalyzer) -> IncrementalBuilder<LineAnalyzer> {
        IncrementalBuilder::new(analyzer, &self.cache)
    }
}

fn names(classes: &[ClassFact]) -> HashSet<String> {
    classes.iter().map(|c| c.name.clone()).collect()
}

fn slot_count(dir: &Path) -> usize {
    if !dir.exists() {
        return 0;
    }
    WalkDir::new(dir)
        .into_iter()
        .filter(|entry| entry.as_ref().unwrap().file_type().is_file())
        .count()
}

fn locations(classes: &[ClassFact]) -> Vec<String> {
    let mut found: Vec<String> = classes.iter().map(|c| c.location.clone()).collect();
    found.sort();
    found
}

const FILES: &[(&str, &str)] = &[
    ("user.rb", "class User\nend\n"),
    ("models/post.rb", "class Post\nend\nclass Comment\nend\n"),
    ("models/tag.rb", "class Tag\nend\n"),
];

#[test]
fn second_run_is_fully_cached_and_equal() {
    let project = Project::new(FILES);
    let builder = project.builder(LineAnalyzer::default());

    let first = builder.build(&[project.src.clone()]).unwrap();
    assert_eq!(first.updated.len(), 3);
    assert!(first.unchanged.is_empty());

    let second = builder.build(&[project.src.clone()]).unwrap();
    assert!(second.updated.is_empty());
    assert_eq!(second.unchanged.len(), 3);
    assert_eq!(names(&first.classes), names(&second.classes));
    assert_eq!(first.classes.len(), second.classes.len());
    assert_eq!(builder.analyzer().batch_count(), 1);
}

#[test]
fn editing_one_file_reanalyzes_only_that_file() {
    let project = Project::new(FILES);
    let builder = project.builder(LineAnalyzer::default());
    builder.build(&[project.src.clone()]).unwrap();

    std::fs::write(project.path("models/tag.rb"), "class Label\nend\n").unwrap();
    let outcome = builder.build(&[project.src.clone()]).unwrap();

    assert_eq!(outcome.updated, vec![project.path("models/tag.rb")]);
    assert_eq!(outcome.unchanged.len(), 2);
    assert_eq!(
        names(&outcome.classes),
        ["User", "Post", "Comment", "Label"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    );
    let batches = builder.analyzer().batches.borrow();
    assert_eq!(batches[1], vec![project.path("models/tag.rb")]);
}

#[test]
fn file_without_classes_is_cached() {
    let project = Project::new(&[("empty.rb", "# nothing here\n"), ("user.rb", "class User\nend\n")]);
    let builder = project.builder(LineAnalyzer::default());

    let first = builder.build(&[project.src.clone()]).unwrap();
    assert_eq!(first.classes.len(), 1);

    let second = builder.build(&[project.src.clone()]).unwrap();
    assert!(second.updated.is_empty());
    assert!(second.unchanged.contains(&project.path("empty.rb")));
    assert_eq!(builder.analyzer().batch_count(), 1);
}

#[test]
fn every_fact_belongs_to_a_requested_file() {
    let project = Project::new(FILES);
    let builder = project.builder(LineAnalyzer::default());
    builder.build(&[project.path("user.rb")]).unwrap();

    let outcome = builder.build(&[project.src.clone()]).unwrap();
    let requested: HashSet<String> = FileCache::new(&project.cache, &[project.src.clone()], &["rb".to_string()])
        .unwrap()
        .files()
        .iter()
        .map(|p| p.display().to_string())
        .collect();
    for fact in &outcome.classes {
        assert!(requested.contains(fact.source_file()), "{}", fact.location);
    }
    assert_eq!(outcome.classes.len(), 4);
}

#[test]
fn analyzer_failure_stores_nothing() {
    let project = Project::new(FILES);
    let builder = project.builder(LineAnalyzer {
        fail: true,
        ..LineAnalyzer::default()
    });

    let err = builder.build(&[project.src.clone()]).unwrap_err();
    assert!(matches!(err, BuildError::Analyzer(_)));
    assert_eq!(slot_count(&project.cache), 0);
}

#[test]
fn stray_fact_is_rejected_before_storing() {
    let project = Project::new(FILES);
    let builder = project.builder(LineAnalyzer {
        stray: true,
        ..LineAnalyzer::default()
    });

    let err = builder.build(&[project.src.clone()]).unwrap_err();
    assert!(matches!(err, BuildError::StrayFact { ref location } if location == "elsewhere.rb:1"));
    assert_eq!(slot_count(&project.cache), 0);
}

#[test]
fn corrupt_slot_surfaces_as_cache_error() {
    let project = Project::new(&[("user.rb", "class User\nend\n")]);
    let builder = project.builder(LineAnalyzer::default());
    builder.build(&[project.src.clone()]).unwrap();

    let cache = FileCache::new(&project.cache, &[project.path("user.rb")], &["rb".to_string()]).unwrap();
    let slot = cache.slot_path(&project.path("user.rb")).unwrap();
    std::fs::write(slot, b"\x00\x00").unwrap();

    let err = builder.build(&[project.src.clone()]).unwrap_err();
    assert!(matches!(err, BuildError::Cache(_)));
}

#[test]
fn same_directory_spelled_twice_is_analyzed_once() {
    // relative to the working directory, so `./name` and `name` differ as paths
    let dir = tempfile::tempdir_in(".").unwrap();
    let name = PathBuf::from(dir.path().file_name().unwrap());
    std::fs::write(name.join("user.rb"), "class User\nend\n").unwrap();
    std::fs::write(name.join("post.rb"), "class Post\nend\n").unwrap();
    let cache = tempfile::tempdir().unwrap();
    let builder = IncrementalBuilder::new(LineAnalyzer::default(), cache.path());
    let inputs = [name.clone(), Path::new(".").join(&name)];

    let first = builder.build(&inputs).unwrap();
    assert_eq!(first.updated.len(), 2);
    assert_eq!(first.classes.len(), 2);

    let second = builder.build(&inputs).unwrap();
    assert!(second.updated.is_empty());
    assert_eq!(second.unchanged, first.updated);
    assert_eq!(locations(&second.classes), locations(&first.classes));
    assert_eq!(slot_count(cache.path()), 2);
}
