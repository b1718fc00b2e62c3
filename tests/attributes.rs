use class2src::jvm::class_file::{self, AttributeInfo, AttributeLike, ClassFile};
use class2src::jvm::model::Class;
use class2src::jvm::*;
use class2src::Settings;

/// Encode an attribute record (header included), registering its name in the pool
fn encode<A: AttributeLike>(pool: &mut ConstantsPool, attribute: A) -> Vec<u8> {
    let info = pool.get_attribute(attribute).unwrap();
    let mut bytes = vec![];
    info.serialize(&mut bytes).unwrap();
    bytes
}

#[test]
fn code_attribute() {
    let mut pool = ConstantsPool::new();
    let runtime_exception = pool.push_class("java/lang/RuntimeException");
    let line_numbers = pool
        .get_attribute(class_file::LineNumberTable(vec![
            class_file::LineNumber {
                start_pc: 0,
                line_number: 3,
            },
            class_file::LineNumber {
                start_pc: 2,
                line_number: 4,
            },
        ]))
        .unwrap();
    let mut bytes = encode(
        &mut pool,
        class_file::Code {
            max_stack: 2,
            max_locals: 3,
            code_array: class_file::BytecodeArray(vec![0x03, 0x3c, 0xb1, 0x57, 0xb1]),
            exception_table: vec![
                class_file::ExceptionHandler {
                    start_pc: 0,
                    end_pc: 3,
                    handler_pc: 3,
                    catch_type: runtime_exception,
                },
                class_file::ExceptionHandler {
                    start_pc: 0,
                    end_pc: 3,
                    handler_pc: 4,
                    catch_type: ConstantIndex(0),
                },
            ],
            attributes: vec![line_numbers],
        },
    );
    bytes.extend_from_slice(&[0xDE, 0xAD]);

    let mut reader = bytes.as_slice();
    let code = match read_attribute(&mut reader, &pool, &Settings::new()).unwrap() {
        Attribute::Code(code) => code,
        other => panic!("expected `Code`, got {:?}", other),
    };
    assert_eq!(reader, &[0xDE, 0xAD]);

    assert_eq!(code.max_stack, 2);
    assert_eq!(code.max_locals, 3);
    assert_eq!(code.code, vec![0x03, 0x3c, 0xb1, 0x57, 0xb1]);
    assert_eq!(
        code.exception_table,
        vec![
            ExceptionHandler {
                start_pc: 0,
                end_pc: 3,
                handler_pc: 3,
                catch_type: String::from("java.lang.RuntimeException"),
            },
            ExceptionHandler {
                start_pc: 0,
                end_pc: 3,
                handler_pc: 4,
                catch_type: String::from(ANY_CLASS_NAME),
            },
        ]
    );
    assert!(!code.exception_table[0].catches_any());
    assert!(code.exception_table[1].catches_any());
    assert_eq!(code.attributes, vec![Attribute::LineNumberTable]);
}

#[test]
fn unknown_attribute_is_skipped_exactly() {
    let mut pool = ConstantsPool::new();
    let name_index = pool.push_utf8("com.example.Vendor");
    let file_name = pool.push_utf8("A.java");
    let source_file = encode(&mut pool, class_file::SourceFile(file_name));

    let mut bytes = vec![];
    AttributeInfo {
        name_index,
        info: vec![1, 2, 3, 4, 5],
    }
    .serialize(&mut bytes)
    .unwrap();
    bytes.extend_from_slice(&source_file);

    let mut reader = bytes.as_slice();
    let settings = Settings::new();
    assert_eq!(
        read_attribute(&mut reader, &pool, &settings).unwrap(),
        Attribute::Unknown {
            name: String::from("com.example.Vendor"),
            length: 5,
        }
    );
    assert_eq!(
        read_attribute(&mut reader, &pool, &settings).unwrap(),
        Attribute::SourceFile(String::from("A.java"))
    );
    assert!(reader.is_empty());
}

#[test]
fn local_variable_table_is_skipped_exactly() {
    let mut pool = ConstantsPool::new();
    let name_index = pool.push_utf8("LocalVariableTable");
    let mut bytes = vec![];
    AttributeInfo {
        name_index,
        // one entry: start_pc, length, name_index, descriptor_index, index
        info: vec![0, 1, 0, 0, 0, 5, 0, 2, 0, 3, 0, 1],
    }
    .serialize(&mut bytes)
    .unwrap();
    bytes.push(0x7F);

    let mut reader = bytes.as_slice();
    assert_eq!(
        read_attribute(&mut reader, &pool, &Settings::new()).unwrap(),
        Attribute::LocalVariableTable
    );
    assert_eq!(reader, &[0x7F]);
}

#[test]
fn code_keeps_nested_attributes_in_order() {
    let mut pool = ConstantsPool::new();
    let profile = AttributeInfo {
        name_index: pool.push_utf8("com.example.Profile"),
        info: vec![9, 9, 9],
    };
    let local_variables = AttributeInfo {
        name_index: pool.push_utf8("LocalVariableTable"),
        info: vec![0, 0],
    };
    let inner_code = pool
        .get_attribute(class_file::Code {
            max_stack: 0,
            max_locals: 0,
            code_array: class_file::BytecodeArray(vec![0xb1]),
            exception_table: vec![],
            attributes: vec![],
        })
        .unwrap();
    let mut bytes = encode(
        &mut pool,
        class_file::Code {
            max_stack: 1,
            max_locals: 2,
            code_array: class_file::BytecodeArray(vec![0x2a, 0xb0]),
            exception_table: vec![],
            attributes: vec![profile, local_variables, inner_code],
        },
    );
    bytes.push(0x7F);

    let mut reader = bytes.as_slice();
    let code = match read_attribute(&mut reader, &pool, &Settings::new()).unwrap() {
        Attribute::Code(code) => code,
        other => panic!("expected `Code`, got {:?}", other),
    };
    assert_eq!(reader, &[0x7F]);
    assert_eq!(
        code.attributes,
        vec![
            Attribute::Unknown {
                name: String::from("com.example.Profile"),
                length: 3,
            },
            Attribute::LocalVariableTable,
            Attribute::Code(Code {
                max_stack: 0,
                max_locals: 0,
                code: vec![0xb1],
                exception_table: vec![],
                attributes: vec![],
            }),
        ]
    );
}

#[test]
fn exceptions_attribute() {
    let mut pool = ConstantsPool::new();
    let io_exception = pool.push_class("java/io/IOException");
    let interrupted = pool.push_class("java/lang/InterruptedException");
    let bytes = encode(&mut pool, class_file::Exceptions(vec![io_exception, interrupted]));

    assert_eq!(
        read_attribute(&mut bytes.as_slice(), &pool, &Settings::new()).unwrap(),
        Attribute::Exceptions(vec![
            String::from("java.io.IOException"),
            String::from("java.lang.InterruptedException"),
        ])
    );
}

#[test]
fn constant_values() {
    let mut pool = ConstantsPool::new();
    let text = pool.push_utf8("say \"hi\"\n");
    let cases = vec![
        (Constant::Integer(-7), "-7"),
        (Constant::Long(5), "5L"),
        (Constant::Float(1.5), "1.5F"),
        (Constant::Double(2.0), "2.0D"),
        (Constant::Double(f64::NAN), "Double.NaN"),
        (Constant::Float(f32::NEG_INFINITY), "Float.NEGATIVE_INFINITY"),
        (Constant::String(text), "\"say \\\"hi\\\"\\n\""),
    ];

    for (constant, expected) in cases {
        let index = pool.push(constant);
        let bytes = encode(&mut pool, class_file::ConstantValue(index));
        assert_eq!(
            read_attribute(&mut bytes.as_slice(), &pool, &Settings::new()).unwrap(),
            Attribute::ConstantValue(String::from(expected))
        );
    }
}

#[test]
fn constant_value_must_be_a_literal() {
    let mut pool = ConstantsPool::new();
    let class = pool.push_class("java/lang/Object");
    let bytes = encode(&mut pool, class_file::ConstantValue(class));
    assert!(matches!(
        read_attribute(&mut bytes.as_slice(), &pool, &Settings::new()),
        Err(Error::UnresolvedConstant { .. })
    ));
}

#[test]
fn truncated_code_attribute() {
    let mut pool = ConstantsPool::new();
    let bytes = encode(
        &mut pool,
        class_file::Code {
            max_stack: 1,
            max_locals: 1,
            code_array: class_file::BytecodeArray(vec![0; 16]),
            exception_table: vec![],
            attributes: vec![],
        },
    );

    for cut in [3, 8, 14, 20, bytes.len() - 1] {
        let mut reader = &bytes[..cut];
        assert!(
            matches!(
                read_attribute(&mut reader, &pool, &Settings::new()),
                Err(Error::TruncatedStream)
            ),
            "cut at {}",
            cut
        );
    }
}

#[test]
fn truncated_unknown_attribute() {
    let mut pool = ConstantsPool::new();
    let name_index = pool.push_utf8("Mystery");
    let mut bytes = vec![];
    AttributeInfo {
        name_index,
        info: vec![0; 10],
    }
    .serialize(&mut bytes)
    .unwrap();
    bytes.truncate(bytes.len() - 4);

    assert!(matches!(
        read_attribute(&mut bytes.as_slice(), &pool, &Settings::new()),
        Err(Error::TruncatedStream)
    ));
}

/// Class with one constant field and one method, written with the wire-level structures
fn sample_class() -> ClassFile {
    let mut constants = ConstantsPool::new();
    let this_class = constants.push_class("com/example/Answer");
    let super_class = constants.push_class("java/lang/Object");
    let runnable = constants.push_class("java/lang/Runnable");
    let io_exception = constants.push_class("java/io/IOException");
    let answer = constants.push(Constant::Integer(42));

    let field = class_file::Field {
        access_flags: FieldAccessFlags::PUBLIC | FieldAccessFlags::STATIC | FieldAccessFlags::FINAL,
        name_index: constants.push_utf8("ANSWER"),
        descriptor_index: constants.push_utf8("I"),
        attributes: vec![
            constants.get_attribute(class_file::ConstantValue(answer)).unwrap(),
            constants.get_attribute(class_file::Synthetic).unwrap(),
        ],
    };

    let method = class_file::Method {
        access_flags: MethodAccessFlags::PUBLIC | MethodAccessFlags::STATIC,
        name_index: constants.push_utf8("main"),
        descriptor_index: constants.push_utf8("([Ljava/lang/String;)V"),
        attributes: vec![
            constants
                .get_attribute(class_file::Code {
                    max_stack: 0,
                    max_locals: 1,
                    code_array: class_file::BytecodeArray(vec![0xb1]),
                    exception_table: vec![],
                    attributes: vec![],
                })
                .unwrap(),
            constants
                .get_attribute(class_file::Exceptions(vec![io_exception]))
                .unwrap(),
            constants.get_attribute(class_file::Deprecated).unwrap(),
        ],
    };

    let source_file = constants.push_utf8("Answer.java");
    let attributes = vec![constants
        .get_attribute(class_file::SourceFile(source_file))
        .unwrap()];

    ClassFile {
        version: Version::JAVA8,
        constants,
        access_flags: ClassAccessFlags::PUBLIC | ClassAccessFlags::SUPER,
        this_class,
        super_class,
        interfaces: vec![runnable],
        fields: vec![field],
        methods: vec![method],
        attributes,
    }
}

#[test]
fn read_whole_class() {
    let mut bytes = vec![];
    sample_class().serialize(&mut bytes).unwrap();

    let mut reader = bytes.as_slice();
    let class = Class::read(&mut reader, &Settings::new()).unwrap();
    assert!(reader.is_empty());

    assert_eq!(class.version, Version::JAVA8);
    assert_eq!(class.this_class, "com.example.Answer");
    assert_eq!(class.super_class.as_deref(), Some("java.lang.Object"));
    assert_eq!(class.interfaces, vec![String::from("java.lang.Runnable")]);
    assert_eq!(class.source_file.as_deref(), Some("Answer.java"));
    assert_eq!(
        class.declaration(),
        "public class com.example.Answer implements java.lang.Runnable"
    );

    let field = class.field("ANSWER").unwrap();
    assert_eq!(field.constant_value.as_deref(), Some("42"));
    assert!(field.synthetic);
    assert_eq!(field.declaration(), "public static final int ANSWER = 42;");

    let method = class.method("main").unwrap();
    assert_eq!(method.max_stack, 0);
    assert_eq!(method.max_locals, 1);
    assert_eq!(method.code.as_deref(), Some(&[0xb1][..]));
    assert!(method.exception_handlers.is_empty());
    assert!(method.deprecated);
    assert_eq!(
        method.signature(),
        "public static void main(java.lang.String[] arg0) throws java.io.IOException"
    );
}

#[test]
fn bad_magic() {
    let mut bytes = vec![];
    sample_class().serialize(&mut bytes).unwrap();
    bytes[0] = 0xCB;

    assert!(matches!(
        Class::read(&mut bytes.as_slice(), &Settings::new()),
        Err(Error::BadMagic(0xCBFEBABE))
    ));
}

#[test]
fn truncated_class() {
    let mut bytes = vec![];
    sample_class().serialize(&mut bytes).unwrap();
    bytes.truncate(bytes.len() - 1);

    assert!(matches!(
        Class::read(&mut bytes.as_slice(), &Settings::new()),
        Err(Error::TruncatedStream)
    ));
}

#[test]
fn interface_declaration() {
    let mut class_file = sample_class();
    class_file.access_flags = ClassAccessFlags::PUBLIC
        | ClassAccessFlags::INTERFACE
        | ClassAccessFlags::ABSTRACT;
    let mut bytes = vec![];
    class_file.serialize(&mut bytes).unwrap();

    let class = Class::read(&mut bytes.as_slice(), &Settings::new()).unwrap();
    assert_eq!(
        class.declaration(),
        "public interface com.example.Answer extends java.lang.Runnable"
    );
}

#[test]
fn this_class_must_be_a_class() {
    let mut class_file = sample_class();
    class_file.this_class = ConstantIndex(0);
    let mut bytes = vec![];
    class_file.serialize(&mut bytes).unwrap();

    assert!(matches!(
        Class::read(&mut bytes.as_slice(), &Settings::new()),
        Err(Error::UnresolvedConstant {
            index: ConstantIndex(0),
            ..
        })
    ));
}
