//! JNI symbol names for native methods
//!
//! The JVM binds a `native` method to an exported symbol whose name is derived
//! from the declaring class and the method:
//!
//! ```text
//! Java_<mangled class>_<mangled method>                      short form
//! Java_<mangled class>_<mangled method>__<mangled arguments> long form, overloads
//! ```
//!
//! Mangling maps `/` and `.` to `_` and escapes everything that is not an
//! ASCII letter or digit:
//!
//! | input                 | output   |
//! |-----------------------|----------|
//! | `_`                   | `_1`     |
//! | `;`                   | `_2`     |
//! | `[`                   | `_3`     |
//! | any other UTF-16 unit | `_0xxxx` |
//!
//! A name that does not match what the managed class declares is an
//! `UnsatisfiedLinkError` at call time, so names are derived here and never
//! written by hand anywhere else.

use std::fmt;

use crate::error::{Error, Result};

/// Prefix shared by every statically bound native method
pub const SYMBOL_PREFIX: &str = "Java_";

const JAVA_KEYWORDS: &[&str] = &[
    "_", "abstract", "assert", "boolean", "break", "byte", "case", "catch", "char", "class",
    "const", "continue", "default", "do", "double", "else", "enum", "extends", "false", "final",
    "finally", "float", "for", "goto", "if", "implements", "import", "instanceof", "int",
    "interface", "long", "native", "new", "null", "package", "private", "protected", "public",
    "return", "short", "static", "strictfp", "super", "switch", "synchronized", "this", "throw",
    "throws", "transient", "true", "try", "void", "volatile", "while",
];

/// JVM limit on array dimensions in a descriptor
const MAX_ARRAY_DIMENSIONS: usize = 255;

/// Mangle a class name, method name or argument descriptor
pub fn mangle(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 8);
    for c in name.chars() {
        match c {
            'a'..='z' | 'A'..='Z' | '0'..='9' => out.push(c),
            '.' | '/' => out.push('_'),
            '_' => out.push_str("_1"),
            ';' => out.push_str("_2"),
            '[' => out.push_str("_3"),
            _ => {
                let mut units = [0u16; 2];
                for unit in c.encode_utf16(&mut units) {
                    out.push_str(&format!("_0{:04x}", unit));
                }
            }
        }
    }
    out
}

fn is_identifier_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == '$'
}

fn is_identifier_part(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

/// Check a single Java identifier (no dots)
pub fn validate_identifier(identifier: &str) -> Result<()> {
    let mut chars = identifier.chars();
    match chars.next() {
        None => return Err(Error::invalid_identifier(identifier, "identifier is empty")),
        Some(c) if !is_identifier_start(c) => {
            return Err(Error::invalid_identifier(
                identifier,
                format!("cannot start with {:?}", c),
            ));
        }
        Some(_) => {}
    }

    if let Some(c) = chars.find(|c| !is_identifier_part(*c)) {
        return Err(Error::invalid_identifier(
            identifier,
            format!("contains {:?}", c),
        ));
    }

    if JAVA_KEYWORDS.contains(&identifier) {
        return Err(Error::invalid_identifier(identifier, "reserved keyword"));
    }

    Ok(())
}

/// Parse one field descriptor from the front of `input`, returning the rest
fn parse_field_type<'a>(input: &'a str, descriptor: &str) -> Result<&'a str> {
    let stripped = input.trim_start_matches('[');
    if input.len() - stripped.len() > MAX_ARRAY_DIMENSIONS {
        return Err(Error::invalid_signature(
            descriptor,
            format!("more than {} array dimensions", MAX_ARRAY_DIMENSIONS),
        ));
    }

    match stripped.chars().next() {
        Some('B' | 'C' | 'D' | 'F' | 'I' | 'J' | 'S' | 'Z') => Ok(&stripped[1..]),
        Some('L') => {
            let end = stripped.find(';').ok_or_else(|| {
                Error::invalid_signature(descriptor, "class type is missing its ';'")
            })?;
            let binary_name = &stripped[1..end];
            for segment in binary_name.split('/') {
                validate_identifier(segment)
                    .map_err(|e| Error::invalid_signature(descriptor, e.to_string()))?;
            }
            Ok(&stripped[end + 1..])
        }
        Some(c) => Err(Error::invalid_signature(
            descriptor,
            format!("unexpected type code {:?}", c),
        )),
        None => Err(Error::invalid_signature(descriptor, "type descriptor ends early")),
    }
}

/// Validate a method descriptor such as `(ILjava/lang/String;)V` and return
/// its argument part (`ILjava/lang/String;`). The return type may be omitted.
pub fn argument_descriptors(descriptor: &str) -> Result<&str> {
    let body = descriptor
        .strip_prefix('(')
        .ok_or_else(|| Error::invalid_signature(descriptor, "must start with '('"))?;
    let close = body
        .find(')')
        .ok_or_else(|| Error::invalid_signature(descriptor, "missing ')'"))?;
    let (arguments, return_type) = (&body[..close], &body[close + 1..]);

    let mut rest = arguments;
    while !rest.is_empty() {
        rest = parse_field_type(rest, descriptor)?;
    }

    if !return_type.is_empty() && return_type != "V" {
        let trailing = parse_field_type(return_type, descriptor)?;
        if !trailing.is_empty() {
            return Err(Error::invalid_signature(
                descriptor,
                format!("trailing characters {:?}", trailing),
            ));
        }
    }

    Ok(arguments)
}

/// A `native` method declared by a managed class
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NativeMethod {
    package: String,
    class: String,
    method: String,
    arguments: Option<String>,
}

impl NativeMethod {
    /// `package` is dotted (`com.example.app`) and may be empty for the
    /// default package. Nested classes use the binary `Outer$Inner` form.
    pub fn new(package: &str, class: &str, method: &str) -> Result<Self> {
        if !package.is_empty() {
            for segment in package.split('.') {
                validate_identifier(segment)?;
            }
        }
        validate_identifier(class)?;
        validate_identifier(method)?;

        Ok(Self {
            package: package.to_string(),
            class: class.to_string(),
            method: method.to_string(),
            arguments: None,
        })
    }

    /// Build from a fully qualified class name in dotted or slashed form
    pub fn from_qualified(qualified_class: &str, method: &str) -> Result<Self> {
        let qualified = qualified_class.replace('/', ".");
        match qualified.rsplit_once('.') {
            Some(("", _)) => Err(Error::invalid_identifier(
                qualified_class,
                "package before the class separator is empty",
            )),
            Some((package, class)) => Self::new(package, class, method),
            None => Self::new("", &qualified, method),
        }
    }

    /// Bind to one overload. Switches [`symbol`](Self::symbol) to the long form.
    pub fn with_signature(mut self, descriptor: &str) -> Result<Self> {
        self.arguments = Some(argument_descriptors(descriptor)?.to_string());
        Ok(self)
    }

    pub fn package(&self) -> &str {
        &self.package
    }

    pub fn class(&self) -> &str {
        &self.class
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn arguments(&self) -> Option<&str> {
        self.arguments.as_deref()
    }

    /// Class name as the JVM spells it internally (`com/example/app/MainActivity`)
    pub fn binary_class_name(&self) -> String {
        if self.package.is_empty() {
            self.class.clone()
        } else {
            format!("{}/{}", self.package.replace('.', "/"), self.class)
        }
    }

    pub fn short_name(&self) -> String {
        format!(
            "{}{}_{}",
            SYMBOL_PREFIX,
            mangle(&self.binary_class_name()),
            mangle(&self.method)
        )
    }

    pub fn long_name(&self) -> String {
        format!(
            "{}__{}",
            self.short_name(),
            mangle(self.arguments.as_deref().unwrap_or(""))
        )
    }

    /// Exported name the JVM looks up for this method
    pub fn symbol(&self) -> String {
        if self.arguments.is_some() {
            self.long_name()
        } else {
            self.short_name()
        }
    }
}

impl fmt::Display for NativeMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.package.is_empty() {
            write!(f, "{}.", self.package)?;
        }
        write!(f, "{}.{}", self.class, self.method)?;
        if let Some(arguments) = &self.arguments {
            write!(f, "({})", arguments)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const APP_PACKAGE: &str = "com.example.esp32_ble_interface_android";

    #[test]
    fn test_main_activity_symbol() {
        let method = NativeMethod::new(APP_PACKAGE, "MainActivity", "stringFromJNI").unwrap();
        assert_eq!(
            method.symbol(),
            "Java_com_example_esp32_1ble_1interface_1android_MainActivity_stringFromJNI"
        );
        assert_eq!(
            method.binary_class_name(),
            "com/example/esp32_ble_interface_android/MainActivity"
        );
    }

    #[test]
    fn test_mangle_escapes() {
        assert_eq!(mangle("a_b"), "a_1b");
        assert_eq!(mangle("java/lang/String;"), "java_lang_String_2");
        assert_eq!(mangle("[B"), "_3B");
        assert_eq!(mangle("Outer$Inner"), "Outer_00024Inner");
        assert_eq!(mangle("caf\u{e9}"), "caf_000e9");
        // Outside the BMP each surrogate is escaped separately
        assert_eq!(mangle("\u{1D11E}"), "_0d834_0dd1e");
    }

    #[test]
    fn test_default_package() {
        let method = NativeMethod::new("", "Greeter", "greet").unwrap();
        assert_eq!(method.symbol(), "Java_Greeter_greet");
        assert_eq!(method.to_string(), "Greeter.greet");
    }

    #[test]
    fn test_from_qualified_accepts_both_separators() {
        let dotted = NativeMethod::from_qualified("com.example.Foo", "bar").unwrap();
        let slashed = NativeMethod::from_qualified("com/example/Foo", "bar").unwrap();
        assert_eq!(dotted, slashed);
        assert_eq!(dotted.package(), "com.example");
        assert_eq!(dotted.class(), "Foo");
    }

    #[test]
    fn test_from_qualified_rejects_empty_package() {
        for qualified in [".Foo", "/Foo"] {
            assert!(
                matches!(
                    NativeMethod::from_qualified(qualified, "bar"),
                    Err(Error::InvalidIdentifier { .. })
                ),
                "{} should be rejected",
                qualified
            );
        }

        // No separator at all means the default package
        let unpackaged = NativeMethod::from_qualified("Foo", "bar").unwrap();
        assert_eq!(unpackaged.package(), "");
        assert_eq!(unpackaged.class(), "Foo");
    }

    #[test]
    fn test_long_names() {
        let method = NativeMethod::new("pkg", "Cls", "f").unwrap();

        let overloaded = method
            .clone()
            .with_signature("(ILjava/lang/String;)V")
            .unwrap();
        assert_eq!(overloaded.symbol(), "Java_pkg_Cls_f__ILjava_lang_String_2");

        let array_arg = method.clone().with_signature("([B)I").unwrap();
        assert_eq!(array_arg.symbol(), "Java_pkg_Cls_f___3B");

        let no_args = method.with_signature("()Ljava/lang/String;").unwrap();
        assert_eq!(no_args.symbol(), "Java_pkg_Cls_f__");
        assert_eq!(no_args.short_name(), "Java_pkg_Cls_f");
    }

    #[test]
    fn test_mismatched_declarations_produce_different_symbols() {
        let exported = NativeMethod::new(APP_PACKAGE, "MainActivity", "stringFromJNI")
            .unwrap()
            .symbol();

        let wrong_case =
            NativeMethod::new(APP_PACKAGE, "MainActivity", "stringFromJni").unwrap();
        let wrong_package = NativeMethod::new(
            "com.example.esp32.ble.interface_android",
            "MainActivity",
            "stringFromJNI",
        )
        .unwrap();
        let wrong_class =
            NativeMethod::new(APP_PACKAGE, "PermissionScreen", "stringFromJNI").unwrap();

        assert_ne!(wrong_case.symbol(), exported);
        assert_ne!(wrong_package.symbol(), exported);
        assert_ne!(wrong_class.symbol(), exported);
    }

    #[test]
    fn test_invalid_identifiers_rejected() {
        for bad in ["", "1abc", "foo-bar", "class", "_", "with space"] {
            assert!(
                matches!(validate_identifier(bad), Err(Error::InvalidIdentifier { .. })),
                "{:?} should be rejected",
                bad
            );
        }
        assert!(NativeMethod::new("com..example", "A", "b").is_err());
        assert!(NativeMethod::new("com.example", "A", "native").is_err());
    }

    #[test]
    fn test_invalid_signatures_rejected() {
        for bad in [
            "I)V",
            "(I",
            "(Q)V",
            "(Ljava/lang/String)V",
            "(L;)V",
            "(I)VV",
            "(I)[",
        ] {
            assert!(
                matches!(argument_descriptors(bad), Err(Error::InvalidSignature { .. })),
                "{:?} should be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_argument_descriptors() {
        assert_eq!(argument_descriptors("()V").unwrap(), "");
        assert_eq!(argument_descriptors("(J[[DZ)").unwrap(), "J[[DZ");
        assert_eq!(
            argument_descriptors("(Landroid/content/Context;)[Ljava/lang/String;").unwrap(),
            "Landroid/content/Context;"
        );
    }
}
