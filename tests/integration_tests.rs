//! 集成测试 - both backends must answer every query the same way

mod common;

use common::backends;
use flexfs::VfsError;
use std::io::Read;
use std::ops::ControlFlow;

#[test]
fn test_exists_files_dirs_and_missing() {
    for b in backends() {
        assert!(b.vfs.exists("a/b.txt").unwrap(), "{}", b.name);
        assert!(!b.vfs.exists("a").unwrap(), "{}", b.name);
        assert!(!b.vfs.exists("a/sub").unwrap(), "{}", b.name);
        assert!(!b.vfs.exists(".").unwrap(), "{}", b.name);
        assert!(!b.vfs.exists("a/missing.txt").unwrap(), "{}", b.name);
        assert!(!b.vfs.exists("missing/deeper.txt").unwrap(), "{}", b.name);
    }
}

#[test]
fn test_path_spellings_are_equivalent() {
    for b in backends() {
        for path in ["./a//b.txt", "a/b.txt", "a/./b.txt", "a/sub/../b.txt"] {
            assert!(b.vfs.exists(path).unwrap(), "{}: {}", b.name, path);
            assert_eq!(b.vfs.read_file(path).unwrap(), b"bee", "{}: {}", b.name, path);
        }
    }
}

#[test]
fn test_open_and_read_agree() {
    for b in backends() {
        for path in ["a/b.txt", "a/nope.txt", "a", "../escape"] {
            let opened = b.vfs.open(path).map(|mut h| {
                let mut content = Vec::new();
                h.read_to_end(&mut content).unwrap();
                content
            });
            let read = b.vfs.read_file(path);
            match (opened, read) {
                (Ok(x), Ok(y)) => assert_eq!(x, y, "{}: {}", b.name, path),
                (Err(x), Err(y)) => {
                    assert_eq!(x.is_not_found(), y.is_not_found(), "{}: {}", b.name, path);
                    assert_eq!(x.to_string(), y.to_string(), "{}: {}", b.name, path);
                }
                (x, y) => panic!("{}: {} disagrees: {:?} vs {:?}", b.name, path, x, y),
            }
        }
    }
}

#[test]
fn test_open_missing_is_not_found() {
    for b in backends() {
        let err = b.vfs.open("a/nope.txt").unwrap_err();
        assert!(err.is_not_found(), "{}", b.name);
        assert!(b.vfs.read_file("a/nope.txt").unwrap_err().is_not_found(), "{}", b.name);
    }
}

#[test]
fn test_lookup_and_find_on_sample_tree() {
    for b in backends() {
        assert_eq!(
            b.vfs.lookup("a", r".*\.txt").unwrap(),
            vec!["a/b.txt", "a/sub/d.txt"],
            "{}",
            b.name
        );
        assert_eq!(b.vfs.find("a", r".*\.log").unwrap().as_deref(), Some("a/c.log"), "{}", b.name);
    }
}

#[test]
fn test_find_agrees_with_lookup() {
    let cases = [
        (".", r"\.txt$"),
        ("a", "c"),
        ("assets", r"\.css$"),
        (".", r"\.png$"),
        ("a/sub", "^d"),
        (".", "index"),
    ];
    for b in backends() {
        for (dir, pattern) in cases {
            let first = b.vfs.find(dir, pattern).unwrap();
            let all = b.vfs.lookup(dir, pattern).unwrap();
            assert_eq!(first.is_none(), all.is_empty(), "{}: {} {}", b.name, dir, pattern);
            if let Some(first) = first {
                assert_eq!(all.first(), Some(&first), "{}: {} {}", b.name, dir, pattern);
            }
        }
    }
}

#[test]
fn test_search_on_sample_tree() {
    for b in backends() {
        assert_eq!(b.vfs.search("a", "b", "", "txt").unwrap().as_deref(), Some("a/b.txt"), "{}", b.name);
        assert_eq!(
            b.vfs.search("a", "b", "sub", "txt").unwrap().as_deref(),
            Some("a/b.txt"),
            "{}",
            b.name
        );
        assert_eq!(
            b.vfs.search("a", "d", "", "txt").unwrap().as_deref(),
            Some("a/sub/d.txt"),
            "{}",
            b.name
        );
        assert_eq!(b.vfs.search(".", "site", "", ".css").unwrap().as_deref(), Some("assets/css/site.css"));
        assert_eq!(b.vfs.search(".", "index", "html", "").unwrap(), None, "{}", b.name);
    }
}

#[test]
fn test_invalid_patterns_yield_errors() {
    for b in backends() {
        assert!(matches!(b.vfs.find(".", "a("), Err(VfsError::InvalidPattern { .. })));
        assert!(matches!(b.vfs.lookup(".", "*"), Err(VfsError::InvalidPattern { .. })));
        assert!(matches!(
            b.vfs.search(".", "[", "", ""),
            Err(VfsError::InvalidSearchPattern { .. })
        ));
        assert!(matches!(
            b.vfs.search(".", "b", "(", ""),
            Err(VfsError::InvalidIgnorePattern { .. })
        ));
        assert!(matches!(
            b.vfs.search("a", "c)|(x", "", "txt"),
            Err(VfsError::InvalidSearchPattern { .. })
        ));
    }
}

#[test]
fn test_queries_on_missing_dir_fail() {
    for b in backends() {
        assert!(b.vfs.find("nope", ".*").unwrap_err().is_not_found(), "{}", b.name);
        assert!(b.vfs.lookup("nope", ".*").unwrap_err().is_not_found(), "{}", b.name);
    }
}

#[test]
fn test_repeated_calls_are_idempotent() {
    for b in backends() {
        let first = b.vfs.lookup(".", ".").unwrap();
        for _ in 0..3 {
            assert_eq!(b.vfs.lookup(".", ".").unwrap(), first, "{}", b.name);
            assert_eq!(b.vfs.find(".", r"\.md$").unwrap().as_deref(), Some("readme.md"));
        }
        assert_eq!(first.len(), 6, "{}", b.name);
    }
}

#[test]
fn test_walk_order_is_identical_across_backends() {
    let orders: Vec<Vec<String>> = backends()
        .iter()
        .map(|b| {
            let mut seen = Vec::new();
            b.vfs
                .tree()
                .walk(".", &mut |e| {
                    seen.push(e.path.clone());
                    ControlFlow::Continue(())
                })
                .unwrap();
            seen
        })
        .collect();
    assert_eq!(orders[0], orders[1]);
    assert_eq!(orders[0][0], ".");
}

#[test]
fn test_serve_root_on_both_backends() {
    for b in backends() {
        let root = b.vfs.serve_root();
        let served = root.open("/assets/index.html").unwrap();
        assert_eq!(served.content_type(), Some("text/html; charset=utf-8"), "{}", b.name);
        let mut body = String::new();
        served.into_handle().unwrap().read_to_string(&mut body).unwrap();
        assert_eq!(body, "<h1>index</h1>", "{}", b.name);

        assert!(root.open("/assets").unwrap().is_dir(), "{}", b.name);
        assert!(root.open("/../outside").is_err(), "{}", b.name);
        let names: Vec<String> = root.read_dir("/").unwrap().into_iter().map(|e| e.name).collect();
        assert_eq!(names, vec!["a", "assets", "readme.md"], "{}", b.name);
    }
}

#[test]
fn test_concurrent_queries_share_one_instance() {
    for b in backends() {
        let vfs = b.vfs.clone();
        std::thread::scope(|s| {
            for _ in 0..4 {
                s.spawn(|| {
                    for _ in 0..20 {
                        assert_eq!(vfs.lookup("a", r"\.txt$").unwrap().len(), 2);
                        assert!(vfs.exists("a/c.log").unwrap());
                    }
                });
            }
        });
    }
}
