//! Integration tests for the full unused-resource pipeline.
//!
//! Each test builds a small Android project tree in a temp directory and
//! runs the complete analysis over it.

use resweep::{Analyzer, Config};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write(root: &Path, rel: &str, contents: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

/// A minimal but complete host project: three declared resources, two of
/// which are referenced.
fn host_project(root: &Path) {
    write(
        root,
        "AndroidManifest.xml",
        r#"<manifest xmlns:android="http://schemas.android.com/apk/res/android"
    package="com.example.app">
    <application android:label="@string/app_name" />
</manifest>"#,
    );
    write(
        root,
        "src/com/example/app/MainActivity.java",
        r#"package com.example.app;

class MainActivity {
    void onCreate() {
        setContentView(R.layout.main);
    }
}
"#,
    );
    write(
        root,
        "res/layout/main.xml",
        r#"<LinearLayout xmlns:android="http://schemas.android.com/apk/res/android">
    <TextView android:text="@string/app_name" />
</LinearLayout>"#,
    );
    write(
        root,
        "res/values/strings.xml",
        r#"<resources>
    <string name="app_name">Demo</string>
    <string name="unused_label">Never shown</string>
</resources>"#,
    );
    write(
        root,
        "gen/com/example/app/R.java",
        r#"package com.example.app;

public final class R {
    public static final class layout {
        public static final int main=0x7f030000;
    }
    public static final class string {
        public static final int app_name=0x7f040000;
        public static final int unused_label=0x7f040001;
    }
}
"#,
    );
}

/// The host registry extended with drawable/icon, which nothing in the
/// host declares or uses.
fn registry_with_icon(root: &Path) {
    write(
        root,
        "gen/com/example/app/R.java",
        r#"package com.example.app;

public final class R {
    public static final class drawable {
        public static final int icon=0x7f020000;
    }
    public static final class layout {
        public static final int main=0x7f030000;
    }
    public static final class string {
        public static final int app_name=0x7f040000;
        public static final int unused_label=0x7f040001;
    }
}
"#,
    );
}

fn library_project(root: &Path, rel: &str) {
    write(
        root,
        &format!("{rel}/AndroidManifest.xml"),
        r#"<manifest package="com.example.lib"></manifest>"#,
    );
    write(
        root,
        &format!("{rel}/gen/com/example/lib/R.java"),
        r#"public final class R {
    public static final class drawable {
        public static final int icon=0x7f020000;
    }
}
"#,
    );
}

#[test]
fn test_end_to_end_unused_detection() {
    let temp = TempDir::new().unwrap();
    host_project(temp.path());

    let report = Analyzer::new(Config::default())
        .analyze(temp.path())
        .unwrap();

    assert_eq!(report.total_declared, 3);
    assert_eq!(report.total_unused, 1);

    // Exactly one unused entry: string/unused_label, declared in strings.xml.
    let unused_types: Vec<_> = report.unused.keys().collect();
    assert_eq!(unused_types, ["string"]);
    let unused_label = &report.unused["string"]["unused_label"];
    assert_eq!(unused_label.declared_paths.len(), 1);
    assert!(unused_label
        .declared_paths
        .iter()
        .all(|path| path.ends_with("strings.xml")));

    // The used partition holds the rest.
    assert!(report.used["string"].contains_key("app_name"));
    assert!(report.used["layout"].contains_key("main"));
}

#[test]
fn test_used_and_unused_partition_the_registry() {
    let temp = TempDir::new().unwrap();
    host_project(temp.path());

    let report = Analyzer::new(Config::default())
        .analyze(temp.path())
        .unwrap();

    let mut seen = std::collections::BTreeSet::new();
    for (res_type, by_name) in report.unused.iter().chain(report.used.iter()) {
        for name in by_name.keys() {
            assert!(
                seen.insert((res_type.clone(), name.clone())),
                "{res_type}/{name} appears in both partitions"
            );
        }
    }
    assert_eq!(seen.len(), report.total_declared);
}

#[test]
fn test_repeated_runs_are_identical() {
    let temp = TempDir::new().unwrap();
    host_project(temp.path());

    let analyzer = Analyzer::new(Config::default());
    let first = analyzer.analyze(temp.path()).unwrap();
    let second = analyzer.analyze(temp.path()).unwrap();

    assert_eq!(
        serde_json::to_string(&first.unused).unwrap(),
        serde_json::to_string(&second.unused).unwrap()
    );
    assert_eq!(
        serde_json::to_string(&first.matrices).unwrap(),
        serde_json::to_string(&second.matrices).unwrap()
    );
}

#[test]
fn test_coverage_matrix_contents() {
    let temp = TempDir::new().unwrap();
    host_project(temp.path());
    // A second configuration for app_name only.
    write(
        temp.path(),
        "res/values-en-rUS/strings.xml",
        r#"<resources><string name="app_name">Demo US</string></resources>"#,
    );

    let report = Analyzer::new(Config::default())
        .analyze(temp.path())
        .unwrap();

    let string_matrix = report
        .matrices
        .iter()
        .find(|matrix| matrix.res_type == "string")
        .expect("string matrix");
    assert_eq!(string_matrix.columns, ["values", "values-en-rUS"]);
    assert_eq!(string_matrix.rows.len(), 1);
    assert_eq!(string_matrix.rows[0].name, "app_name");
    assert_eq!(string_matrix.rows[0].cells, [true, true]);
}

#[test]
fn test_library_supplied_resource_is_silently_dropped() {
    let temp = TempDir::new().unwrap();
    host_project(temp.path());
    registry_with_icon(temp.path());
    write(
        temp.path(),
        "project.properties",
        "target=android-19\nandroid.library.reference.1=shared-lib\n",
    );
    library_project(temp.path(), "shared-lib");

    let report = Analyzer::new(Config::default())
        .analyze(temp.path())
        .unwrap();

    // drawable/icon came from the library and vanishes from the report.
    assert!(!report.unused.contains_key("drawable"));
    assert!(!report.used.contains_key("drawable"));
    assert_eq!(report.removed_by_libraries, 1);
    assert_eq!(report.total_unused, 1);
}

#[test]
fn test_unused_binary_drawable_reports_its_declared_path() {
    let temp = TempDir::new().unwrap();
    host_project(temp.path());
    registry_with_icon(temp.path());
    let png = temp.path().join("res/drawable/icon.png");
    fs::create_dir_all(png.parent().unwrap()).unwrap();
    fs::write(&png, [0x89, 0x50, 0x4E, 0x47, 0xFF, 0xFE, 0x00, 0x01]).unwrap();

    let report = Analyzer::new(Config::default())
        .analyze(temp.path())
        .unwrap();

    let icon = &report.unused["drawable"]["icon"];
    assert_eq!(icon.declared_paths.len(), 1);
    assert!(icon.declared_paths.iter().all(|path| path.ends_with("icon.png")));
}

#[test]
fn test_binary_drawable_redeclaration_prevents_library_removal() {
    let temp = TempDir::new().unwrap();
    host_project(temp.path());
    registry_with_icon(temp.path());
    // The host overrides the library drawable with a binary file.
    let png = temp.path().join("res/drawable/icon.png");
    fs::create_dir_all(png.parent().unwrap()).unwrap();
    fs::write(&png, [0x89, 0x50, 0x4E, 0x47, 0xFF, 0xFE, 0x00, 0x01]).unwrap();
    write(
        temp.path(),
        "project.properties",
        "target=android-19\nandroid.library.reference.1=shared-lib\n",
    );
    library_project(temp.path(), "shared-lib");

    let report = Analyzer::new(Config::default())
        .analyze(temp.path())
        .unwrap();

    assert!(report.unused["drawable"].contains_key("icon"));
    assert_eq!(report.removed_by_libraries, 0);
}

#[test]
fn test_host_redeclared_library_resource_stays_reported() {
    let temp = TempDir::new().unwrap();
    host_project(temp.path());
    registry_with_icon(temp.path());
    // The host overrides the library drawable without using it.
    write(
        temp.path(),
        "res/drawable/icon.xml",
        r#"<shape xmlns:android="http://schemas.android.com/apk/res/android" />"#,
    );
    library_project(temp.path(), "shared-lib");

    // Library supplied via configuration rather than project.properties.
    let config = Config {
        libraries: vec!["shared-lib".into()],
        ..Config::default()
    };
    let report = Analyzer::new(config).analyze(temp.path()).unwrap();

    assert!(report.unused["drawable"].contains_key("icon"));
    assert_eq!(report.removed_by_libraries, 0);
}

#[test]
fn test_styleable_attribute_declared_only_inside_its_group() {
    let temp = TempDir::new().unwrap();
    host_project(temp.path());
    write(
        temp.path(),
        "gen/com/example/app/R.java",
        r#"package com.example.app;

public final class R {
    public static final class styleable {
        public static final int[] Widget = {
            0x7f010000
        };
        public static final int Widget_color = 0;
    }
}
"#,
    );
    write(
        temp.path(),
        "res/values/attrs.xml",
        r#"<resources>
    <declare-styleable name="Widget">
        <attr name="color" format="color"/>
    </declare-styleable>
</resources>"#,
    );
    write(
        temp.path(),
        "res/values/other_attrs.xml",
        r#"<resources>
    <declare-styleable name="Other">
        <attr name="color" format="color"/>
    </declare-styleable>
</resources>"#,
    );

    let report = Analyzer::new(Config::default())
        .analyze(temp.path())
        .unwrap();

    // Declared once, via the nested block inside its own group only.
    let widget_color = &report.unused["styleable"]["Widget_color"];
    assert_eq!(widget_color.declared_paths.len(), 1);
    assert!(widget_color
        .declared_paths
        .iter()
        .all(|path| path.ends_with("attrs.xml") && !path.ends_with("other_attrs.xml")));
}

#[test]
fn test_manifest_reference_marks_resource_used() {
    let temp = TempDir::new().unwrap();
    host_project(temp.path());
    // app_icon is referenced only from the manifest.
    write(
        temp.path(),
        "AndroidManifest.xml",
        r#"<manifest xmlns:android="http://schemas.android.com/apk/res/android"
    package="com.example.app">
    <application android:icon="@drawable/app_icon" android:label="@string/app_name" />
</manifest>"#,
    );
    registry_with_icon(temp.path());
    write(
        temp.path(),
        "gen/com/example/app/R.java",
        r#"package com.example.app;

public final class R {
    public static final class drawable {
        public static final int app_icon=0x7f020000;
    }
    public static final class layout {
        public static final int main=0x7f030000;
    }
    public static final class string {
        public static final int app_name=0x7f040000;
        public static final int unused_label=0x7f040001;
    }
}
"#,
    );

    let report = Analyzer::new(Config::default())
        .analyze(temp.path())
        .unwrap();

    assert!(report.used["drawable"].contains_key("app_icon"));
    assert_eq!(report.total_unused, 1);
}

#[test]
fn test_invalid_project_root_is_a_structural_error() {
    let temp = TempDir::new().unwrap();

    let err = Analyzer::new(Config::default())
        .analyze(temp.path())
        .unwrap_err();
    assert!(err.to_string().contains(&temp.path().display().to_string()));
}
