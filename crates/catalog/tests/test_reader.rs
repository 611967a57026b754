//! Integration test: reading catalogs from disk.

use std::io::Write;
use std::path::Path;

use stars_catalog::{CatalogError, ReaderConfig, read_catalog};

fn write_file(dir: &Path, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    let mut f = std::fs::File::create(&path).expect("create catalog file");
    f.write_all(contents.as_bytes()).expect("write catalog file");
    path
}

#[test]
fn read_catalog_file_not_found() {
    let path = Path::new("/tmp/stars_test_nonexistent_catalog.csv");
    let result = read_catalog(path, &ReaderConfig::default());

    let err = result.unwrap_err();
    assert!(
        matches!(err, CatalogError::FileNotFound { .. }),
        "expected FileNotFound, got {err:?}",
    );
}

#[test]
fn read_catalog_invalid_config_rejects_early() {
    let path = Path::new("/tmp/stars_test_nonexistent_catalog.csv");
    let config = ReaderConfig::default().with_delimiter('\n');

    // Config validation happens before the file is looked up.
    let err = read_catalog(path, &config).unwrap_err();
    assert!(
        matches!(err, CatalogError::InvalidDelimiter { .. }),
        "expected InvalidDelimiter, got {err:?}",
    );
}

#[test]
fn read_catalog_ten_stars() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = write_file(
        dir.path(),
        "ten-star.csv",
        "StarID,ProperName,X,Y,Z\n\
         0,Sol,0,0,0\n\
         1,Andreas,282.43485,0.00449,5.36884\n\
         2,Rory,43.04329,0.00285,-15.24144\n\
         3,Mortimer,277.11358,0.02422,223.27753\n\
         3759,96 G. Psc,7.26388,1.55643,0.68697\n\
         70667,Proxima Centauri,-0.47175,-0.36132,-1.15037\n\
         71454,Rigel Kentaurus B,-0.50359,-0.42128,-1.1767\n\
         71457,Rigel Kentaurus A,-0.50362,-0.42139,-1.17665\n\
         87666,Barnard's Star,-0.01729,-1.81533,0.14824\n\
         118721,,-2.28262,0.64697,0.29354\n",
    );

    let catalog = read_catalog(&path, &ReaderConfig::default()).expect("read catalog");
    assert_eq!(catalog.len(), 10);
    assert_eq!(catalog.iter().nth(0).unwrap().label(), "Sol");
    assert_eq!(catalog.iter().nth(9).unwrap().id(), "118721");
    assert_eq!(catalog.iter().nth(9).unwrap().label(), "");

    let (idx, star) = catalog.find_by_label("Barnard's Star").unwrap();
    assert_eq!(idx, 8);
    assert_eq!(star.id(), "87666");
}

#[test]
fn read_catalog_tab_separated() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = write_file(dir.path(), "stars.tsv", "0\tSol\t0\t0\t0\n1\tVega\t3\t4\t0\n");

    let config = ReaderConfig::default().with_delimiter('\t');
    let catalog = read_catalog(&path, &config).expect("read catalog");
    assert_eq!(catalog.len(), 2);
    assert_eq!(catalog.iter().nth(1).unwrap().coords(), &[3.0, 4.0, 0.0]);
}

#[test]
fn read_catalog_reports_bad_line() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = write_file(
        dir.path(),
        "bad.csv",
        "StarID,ProperName,X,Y,Z\n0,Sol,0,0,0\n1,Broken,1,2\n",
    );

    let err = read_catalog(&path, &ReaderConfig::default()).unwrap_err();
    assert!(
        matches!(err, CatalogError::InvalidRecord { line: 3, .. }),
        "expected InvalidRecord on line 3, got {err:?}",
    );
}
