//! JNI bindings for Android.
//!
//! These functions are called from Kotlin via the JNI bridge.

use jni::objects::{JClass, JString};
use jni::sys::jstring;
use jni::JNIEnv;

use crate::{convert_json, render_file_to_svg, SheetOptions};

/// Read an optional Java string; null maps to `None`.
fn optional_string(env: &mut JNIEnv, value: &JString) -> Option<String> {
    if value.is_null() {
        None
    } else {
        env.get_string(value).ok().map(|s| s.into())
    }
}

fn to_jstring(env: &mut JNIEnv, value: &str) -> jstring {
    match env.new_string(value) {
        Ok(js) => js.into_raw(),
        Err(_) => std::ptr::null_mut(),
    }
}

/// Convert notes JSON to tablature JSON.
///
/// Called from Kotlin as:
///   external fun convertJson(notesJson: String, keyRoot: String?, optionsJson: String?): String?
#[no_mangle]
pub extern "system" fn Java_com_kunkunshi_app_KunkunLib_convertJson(
    mut env: JNIEnv,
    _class: JClass,
    notes_json: JString,
    key_root: JString,
    options_json: JString,
) -> jstring {
    let notes: String = match env.get_string(&notes_json) {
        Ok(s) => s.into(),
        Err(_) => return std::ptr::null_mut(),
    };
    let key = optional_string(&mut env, &key_root).unwrap_or_else(|| "C".to_string());
    let options = optional_string(&mut env, &options_json);

    match convert_json(&notes, &key, options.as_deref()) {
        Ok(out) => to_jstring(&mut env, &out),
        Err(_) => std::ptr::null_mut(),
    }
}

/// Render a melody file (MusicXML, MXL or notes JSON) to an SVG sheet.
///
/// Called from Kotlin as:
///   external fun renderFile(path: String, keyRoot: String?): String?
#[no_mangle]
pub extern "system" fn Java_com_kunkunshi_app_KunkunLib_renderFile(
    mut env: JNIEnv,
    _class: JClass,
    path: JString,
    key_root: JString,
) -> jstring {
    let path_str: String = match env.get_string(&path) {
        Ok(s) => s.into(),
        Err(_) => return std::ptr::null_mut(),
    };
    let key = optional_string(&mut env, &key_root).unwrap_or_else(|| "C".to_string());

    match render_file_to_svg(&path_str, &key, &SheetOptions::default()) {
        Ok(svg) => to_jstring(&mut env, &svg),
        Err(_) => std::ptr::null_mut(),
    }
}
