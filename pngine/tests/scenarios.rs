//! End-to-end assembler scenarios with literal expected byte output.

use pngine::{assemble, decode, Sexpr};

fn atom(s: &str) -> Sexpr {
    Sexpr::atom(s)
}

fn str_(s: &str) -> Sexpr {
    Sexpr::str(s)
}

fn num(n: i64) -> Sexpr {
    Sexpr::Num(n)
}

fn list(items: Vec<Sexpr>) -> Sexpr {
    Sexpr::List(items)
}

#[test]
fn s1_empty_module() {
    let source = list(vec![atom("module"), str_("test")]);
    let bytes = assemble(&[source]).unwrap();

    assert_eq!(&bytes[0..4], b"PNGB");
    assert_eq!(&bytes[4..6], &5u16.to_le_bytes());
    let string_table_offset = u32::from_le_bytes(bytes[20..24].try_into().unwrap());
    assert_eq!(string_table_offset, 40);

    let module = decode(&bytes).unwrap();
    assert_eq!(module.strings().count(), 1);
    assert_eq!(module.strings().get(pngine::StringId::new(0)), b"test");
}

#[test]
fn s2_data_blob() {
    let source = list(vec![
        atom("module"),
        str_("t"),
        list(vec![atom("data"), atom("$d:0"), str_("hello world")]),
    ]);
    let bytes = assemble(&[source]).unwrap();
    let module = decode(&bytes).unwrap();

    assert_eq!(module.data().count(), 1);
    let blob = module.data().get(pngine::DataId::new(0));
    assert_eq!(blob.len(), 11);
    assert_eq!(blob, b"hello world");
}

#[test]
fn s3_minimal_draw() {
    let forms = vec![
        list(vec![atom("shader"), num(0), str_("@vertex fn v() {}")]),
        list(vec![
            atom("pipeline"),
            num(0),
            list(vec![atom("json"), str_("{}")]),
        ]),
        list(vec![
            atom("frame"),
            str_("main"),
            list(vec![
                atom("begin-render-pass"),
                atom(":texture"),
                num(0),
                atom(":load"),
                atom("clear"),
                atom(":store"),
                atom("store"),
            ]),
            list(vec![atom("set-pipeline"), num(0)]),
            list(vec![atom("draw"), num(3), num(1)]),
            list(vec![atom("end-pass")]),
            list(vec![atom("submit")]),
        ]),
    ];
    let bytes = assemble(&forms).unwrap();
    let module = decode(&bytes).unwrap();
    let bytecode = module.bytecode();

    assert_eq!(bytecode[0], 0x04);
    let expected = [0x04u8, 0x08, 0x30, 0x10, 0x12, 0x16, 0x19, 0x24, 0x31];
    let mut found = Vec::new();
    for &byte in bytecode {
        if expected.get(found.len()) == Some(&byte) {
            found.push(byte);
        }
    }
    assert_eq!(found, expected);
}

#[test]
fn s6_dedup() {
    let mut builder = pngine::Builder::new();
    let a0 = builder.intern_string(b"a").unwrap();
    let b = builder.intern_string(b"b").unwrap();
    let a1 = builder.intern_string(b"a").unwrap();

    assert_eq!(a0.get(), 0);
    assert_eq!(b.get(), 1);
    assert_eq!(a1.get(), 0);

    let bytes = builder.finalize();
    let module = decode(&bytes).unwrap();
    assert_eq!(module.strings().count(), 2);
}

#[test]
fn unknown_top_level_form_faults() {
    let forms = vec![list(vec![atom("frobnicate"), num(0)])];
    let err = assemble(&forms).unwrap_err();
    assert!(matches!(err, pngine::AssembleError::UnknownForm(_)));
}

#[test]
fn duplicate_resource_id_faults() {
    let forms = vec![
        list(vec![
            atom("shader"),
            atom("$shd:0"),
            list(vec![atom("code"), atom("$d:0")]),
        ]),
        list(vec![atom("data"), atom("$d:0"), str_("ignored")]),
        list(vec![
            atom("shader"),
            atom("$shd:0"),
            list(vec![atom("code"), atom("$d:0")]),
        ]),
    ];
    let err = assemble(&forms).unwrap_err();
    assert!(matches!(err, pngine::AssembleError::DuplicateResource(_)));
}

#[test]
fn undefined_resource_reference_faults() {
    let forms = vec![list(vec![
        atom("shader"),
        atom("$shd:0"),
        list(vec![atom("code"), atom("$d:7")]),
    ])];
    let err = assemble(&forms).unwrap_err();
    assert!(matches!(err, pngine::AssembleError::UndefinedResource(_)));
}
