//! Hand-assembled class files and archive fixtures.

use std::fs::File;
use std::io::Write;
use std::path::Path;

pub const ACC_PUBLIC: u16 = 0x0001;
pub const ACC_PRIVATE: u16 = 0x0002;
pub const ACC_STATIC: u16 = 0x0008;
pub const ACC_SUPER: u16 = 0x0020;
pub const ACC_INTERFACE: u16 = 0x0200;
pub const ACC_ABSTRACT: u16 = 0x0400;

const OBJECT: &str = "java/lang/Object";

/// Minimal description of a class file to emit.
pub struct ClassDef<'a> {
    /// Internal name, e.g. `com/acme/Foo`
    pub name: &'a str,
    pub super_name: &'a str,
    pub interfaces: &'a [&'a str],
    pub access: u16,
    /// Emit an `InnerClasses` record marking this type private.
    pub private_nested: bool,
}

impl<'a> ClassDef<'a> {
    pub fn class(name: &'a str, interfaces: &'a [&'a str]) -> Self {
        Self {
            name,
            super_name: OBJECT,
            interfaces,
            access: ACC_PUBLIC | ACC_SUPER,
            private_nested: false,
        }
    }

    pub fn interface(name: &'a str, extends: &'a [&'a str]) -> Self {
        Self {
            name,
            super_name: OBJECT,
            interfaces: extends,
            access: ACC_PUBLIC | ACC_INTERFACE | ACC_ABSTRACT,
            private_nested: false,
        }
    }

    pub fn extending(mut self, super_name: &'a str) -> Self {
        self.super_name = super_name;
        self
    }

    pub fn abstract_class(mut self) -> Self {
        self.access |= ACC_ABSTRACT;
        self
    }

    pub fn private_nested(mut self) -> Self {
        self.private_nested = true;
        self
    }

    /// Java 8 class file bytes with no fields or methods.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut pool = ConstantPool::default();
        let this_class = pool.class(self.name);
        let super_class = pool.class(self.super_name);
        let interfaces: Vec<u16> = self.interfaces.iter().map(|i| pool.class(i)).collect();
        let inner_classes_name = self.private_nested.then(|| pool.utf8("InnerClasses"));

        let mut out = Vec::new();
        out.extend_from_slice(&[0xCA, 0xFE, 0xBA, 0xBE]);
        put_u16(&mut out, 0); // minor
        put_u16(&mut out, 52); // major
        put_u16(&mut out, pool.count + 1);
        out.extend_from_slice(&pool.bytes);
        put_u16(&mut out, self.access);
        put_u16(&mut out, this_class);
        put_u16(&mut out, super_class);
        put_u16(&mut out, interfaces.len() as u16);
        for index in &interfaces {
            put_u16(&mut out, *index);
        }
        put_u16(&mut out, 0); // fields
        put_u16(&mut out, 0); // methods

        match inner_classes_name {
            Some(name_index) => {
                put_u16(&mut out, 1);
                put_u16(&mut out, name_index);
                out.extend_from_slice(&10u32.to_be_bytes());
                put_u16(&mut out, 1);
                put_u16(&mut out, this_class);
                put_u16(&mut out, 0); // outer
                put_u16(&mut out, 0); // simple name
                put_u16(&mut out, ACC_PRIVATE | ACC_STATIC);
            }
            None => put_u16(&mut out, 0),
        }

        out
    }

    /// Archive entry path for this class.
    pub fn entry(&self) -> String {
        format!("{}.class", self.name)
    }
}

#[derive(Default)]
struct ConstantPool {
    bytes: Vec<u8>,
    count: u16,
}

impl ConstantPool {
    fn utf8(&mut self, value: &str) -> u16 {
        self.bytes.push(1);
        put_u16(&mut self.bytes, value.len() as u16);
        self.bytes.extend_from_slice(value.as_bytes());
        self.count += 1;
        self.count
    }

    fn class(&mut self, name: &str) -> u16 {
        let name_index = self.utf8(name);
        self.bytes.push(7);
        put_u16(&mut self.bytes, name_index);
        self.count += 1;
        self.count
    }
}

fn put_u16(out: &mut Vec<u8>, value: u16) {
    out.extend_from_slice(&value.to_be_bytes());
}

/// Write an archive holding each class at its entry path.
pub fn write_jar(path: &Path, classes: &[ClassDef<'_>]) {
    let file = File::create(path).unwrap();
    let mut zip = zip::ZipWriter::new(file);
    let options = zip::write::SimpleFileOptions::default();
    for class in classes {
        zip.start_file(class.entry(), options).unwrap();
        zip.write_all(&class.to_bytes()).unwrap();
    }
    zip.finish().unwrap();
}

/// Write raw bytes at `entry` below `dir`.
pub fn write_unit(dir: &Path, entry: &str, bytes: &[u8]) {
    let path = dir.join(entry);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, bytes).unwrap();
}
