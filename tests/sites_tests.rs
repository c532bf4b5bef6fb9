use std::fs;
use std::path::PathBuf;

use wlc_rs::sites::{default_allowed, load_hosts_from_path, load_hosts_or_default, parse_hosts_str};

fn temp_file(name: &str, content: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("wlc-rs-{}-{name}", std::process::id()));
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn parse_hosts_file_format() {
    let input = r#"
        # domestic
        Yandex.ru
        vk.com   # social
        ya.ru
        vk.com   # duplicate

    "#;

    let hosts = parse_hosts_str(input).expect("parse ok");
    assert_eq!(hosts, vec!["yandex.ru", "vk.com", "ya.ru"]);
}

#[test]
fn load_from_file() {
    let path = temp_file("ok.txt", "github.com\nt.me\n");
    let hosts = load_hosts_from_path(&path).unwrap();
    assert_eq!(hosts, vec!["github.com", "t.me"]);
    let _ = fs::remove_file(path);
}

#[test]
fn missing_file_is_an_error() {
    let path = std::env::temp_dir().join("wlc-rs-definitely-missing.txt");
    let err = load_hosts_from_path(&path).unwrap_err();
    assert!(err.to_string().contains("failed to read hosts file"));
}

#[test]
fn comment_only_file_is_rejected() {
    let path = temp_file("empty.txt", "# nothing here\n\n");
    assert!(load_hosts_or_default(Some(&path), default_allowed()).is_err());
    let _ = fs::remove_file(path);
}
