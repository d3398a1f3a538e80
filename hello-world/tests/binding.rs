use hello::{world_to, Java_greetings_Hello_world, GREETING};
use jni_sys::{jclass, JNIEnv};

/// Mirrors the declaration `javah` generates for `greetings.Hello.world()`:
///
/// `JNIEXPORT void JNICALL Java_greetings_Hello_world(JNIEnv *, jclass);`
type HelloWorldFn = extern "system" fn(*mut JNIEnv, jclass);

// Calls below write to the process stdout directly, so `Hello world` shows up in the test
// output even when libtest captures it.
#[test]
fn test_bridge_matches_generated_header() {
    let bridge: HelloWorldFn = Java_greetings_Hello_world;
    bridge(std::ptr::null_mut(), std::ptr::null_mut());
}

#[test]
fn test_handles_do_not_change_output() {
    let mut first = Vec::new();
    let mut second = Vec::new();
    world_to(&mut first).unwrap();
    world_to(&mut second).unwrap();

    assert_eq!(first, second);
    assert_eq!(first, format!("{}\n", GREETING).into_bytes());
}
