//! Runs the `nativeloader` binary end to end.

use std::{
    fs,
    path::{Path, PathBuf},
    process::Command,
};

use nativeloader_utils::platform;

//--------------------------------------------------------------------------------------------------
// Helpers
//--------------------------------------------------------------------------------------------------

fn nativeloader() -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_nativeloader"));
    command.env_remove("RUST_LOG");
    command
}

/// Copies the `hello` cdylib cargo built next to this test binary into `dir`, under its plain
/// platform name. Dependencies may carry a `-<hash>` suffix, so both forms are looked for.
///
/// Kept in step with the copy in `nativeloader-core/tests/loader.rs`.
fn hello_cdylib(dir: &Path) -> Option<PathBuf> {
    let exe = std::env::current_exe().ok()?;
    let deps = exe.parent()?;
    let name = platform::map_library_name(hello::LIBRARY_NAME);
    let hashed = format!("{}{}-", std::env::consts::DLL_PREFIX, hello::LIBRARY_NAME);

    let built = [Some(deps), deps.parent()]
        .into_iter()
        .flatten()
        .find_map(|candidate| {
            let plain = candidate.join(&name);
            if plain.is_file() {
                return Some(plain);
            }
            fs::read_dir(candidate)
                .ok()?
                .filter_map(Result::ok)
                .map(|entry| entry.path())
                .find(|path| {
                    path.file_name()
                        .and_then(|n| n.to_str())
                        .is_some_and(|n| {
                            n.starts_with(&hashed) && n.ends_with(std::env::consts::DLL_SUFFIX)
                        })
                })
        })?;

    let copy = dir.join(&name);
    fs::copy(built, &copy).ok()?;
    Some(copy)
}

fn stdout_of(command: &mut Command) -> String {
    let output = command.output().unwrap();
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout).unwrap()
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------

#[test]
fn test_platform_prints_folder_path() {
    assert_eq!(
        stdout_of(nativeloader().arg("platform")),
        format!("{}\n", platform::native_lib_folder_path())
    );
    assert_eq!(
        stdout_of(nativeloader().args(["platform", "--os"])),
        format!("{}\n", platform::os_name())
    );
    assert_eq!(
        stdout_of(nativeloader().args(["platform", "--arch"])),
        format!("{}\n", platform::arch_name())
    );
}

#[test]
fn test_symbol_prints_jni_names() {
    assert_eq!(
        stdout_of(nativeloader().args(["symbol", "greetings.Hello", "world"])),
        "Java_greetings_Hello_world\n"
    );
    assert_eq!(
        stdout_of(nativeloader().args(["symbol", "greetings.Hello", "world", "-s", "(I)V"])),
        "Java_greetings_Hello_world__I\n"
    );
}

#[test]
fn test_stage_then_invoke_prints_hello_world_once() {
    let build = tempfile::tempdir().unwrap();
    let library =
        hello_cdylib(build.path()).expect("hello cdylib is built next to the test binary");

    let root = tempfile::tempdir().unwrap();
    let extract = tempfile::tempdir().unwrap();

    let staged = nativeloader()
        .arg("stage")
        .arg(hello::PREFIX)
        .arg(&library)
        .arg("--root")
        .arg(root.path())
        .status()
        .unwrap();
    assert!(staged.success());

    let stdout = stdout_of(
        nativeloader()
            .args([
                "invoke",
                hello::PREFIX,
                hello::LIBRARY_NAME,
                hello::CLASS_NAME,
                hello::METHOD_NAME,
            ])
            .arg("--root")
            .arg(root.path())
            .arg("-D")
            .arg(format!("greetings.path={}", extract.path().display())),
    );
    assert_eq!(stdout, "Hello world\n");

    // The loader removes its extracted copy when the process is done with it
    assert_eq!(fs::read_dir(extract.path()).unwrap().count(), 0);
}

#[test]
fn test_invoke_missing_library_fails() {
    let root = tempfile::tempdir().unwrap();
    let output = nativeloader()
        .args(["invoke", "hello", "world", "hello.World", "run", "--root"])
        .arg(root.path())
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Native library missing"));
}

#[test]
fn test_invoke_disabled_library_is_unsatisfied() {
    let root = tempfile::tempdir().unwrap();
    let output = nativeloader()
        .args(["invoke", "greetings", "hello", "greetings.Hello", "world", "--root"])
        .arg(root.path())
        .args(["-D", "greetings.hello.disabled=true"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Java_greetings_Hello_world"));
}
