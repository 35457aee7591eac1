use sergen_common::Structure;
use sergen_gen_config::GenTarget;
use std::collections::BTreeSet;
use std::io::{self, Write};

/// Fixed banner emitted once at the top of each generated output file.
/// Deliberately free of timestamps so regeneration is byte-identical.
pub fn generate_unit_banner(out: &mut dyn Write, translation_unit: &str) -> io::Result<()> {
    writeln!(out, "// Serialization accessors generated by sergen")?;
    writeln!(out, "// Translation unit: {translation_unit}")?;
    writeln!(out, "// Do not edit; regenerate instead.")?;
    writeln!(out)
}

/// Emits the two method definitions for one qualifying structure.
///
/// Fields are marshalled in declaration order, which is what fixes the
/// byte order of the buffer. A scalar field is copied bytewise and the
/// cursor advanced by exactly its size; a field whose type spelling names
/// another qualifying structure delegates to that structure's own
/// marker methods instead, so nested structures are never flattened here.
///
/// The two bodies are exact mirrors: the statement sequence of
/// `deserialize` reads what `serialize` wrote, field for field, with the
/// same cursor stride. Fails only if the sink rejects a write.
pub fn generate_serialization_methods(
    out: &mut dyn Write,
    structure: &Structure,
    target: &GenTarget,
    nested_types: &BTreeSet<String>,
) -> io::Result<()> {
    let serialize = &target.serialize_marker;
    let deserialize = &target.deserialize_marker;

    let serialize_qualifier = const_qualifier(&serialize.type_spelling);
    writeln!(
        out,
        "void {}::{}(char *& cursor){}",
        structure.name, serialize.name, serialize_qualifier
    )?;
    writeln!(out, "{{")?;
    for field in &structure.fields {
        if nested_types.contains(&field.type_spelling) {
            writeln!(out, "  this->{}.{}(cursor);", field.name, serialize.name)?;
        } else {
            writeln!(
                out,
                "  std::memcpy(cursor, &this->{0}, sizeof(this->{0}));",
                field.name
            )?;
            writeln!(out, "  cursor += sizeof(this->{});", field.name)?;
        }
    }
    writeln!(out, "}}")?;
    writeln!(out)?;

    let deserialize_qualifier = const_qualifier(&deserialize.type_spelling);
    writeln!(
        out,
        "void {}::{}(char *& cursor){}",
        structure.name, deserialize.name, deserialize_qualifier
    )?;
    writeln!(out, "{{")?;
    for field in &structure.fields {
        if nested_types.contains(&field.type_spelling) {
            writeln!(out, "  this->{}.{}(cursor);", field.name, deserialize.name)?;
        } else {
            writeln!(
                out,
                "  std::memcpy(&this->{0}, cursor, sizeof(this->{0}));",
                field.name
            )?;
            writeln!(out, "  cursor += sizeof(this->{});", field.name)?;
        }
    }
    writeln!(out, "}}")?;
    writeln!(out)
}

// The emitted definition must carry the same cv-qualifier the declared
// marker stub does, or the definition won't match the declaration.
fn const_qualifier(type_spelling: &str) -> &'static str {
    if type_spelling.trim_end().ends_with("const") {
        " const"
    } else {
        ""
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sergen_common::{Field, Method};

    fn packet_header() -> Structure {
        Structure::new("PacketHeader")
            .with_methods(vec![
                Method::new("serialize", "void (char *&) const"),
                Method::new("deserialize", "void (char *&)"),
            ])
            .with_fields(vec![
                Field::new("apid", "uint16_t"),
                Field::new("length", "uint16_t"),
                Field::new("flags", "uint8_t"),
            ])
    }

    fn generate_to_string(structure: &Structure, nested: &BTreeSet<String>) -> String {
        let mut out = Vec::new();
        generate_serialization_methods(&mut out, structure, &GenTarget::default(), nested)
            .expect("writing to a Vec cannot fail");
        String::from_utf8(out).expect("generated code is UTF-8")
    }

    #[test]
    fn emits_both_method_definitions() {
        let text = generate_to_string(&packet_header(), &BTreeSet::new());

        assert!(text.contains("void PacketHeader::serialize(char *& cursor) const"));
        assert!(text.contains("void PacketHeader::deserialize(char *& cursor)"));
        // The deserialize definition must not be const-qualified
        assert!(!text.contains("deserialize(char *& cursor) const"));
    }

    #[test]
    fn fields_are_emitted_in_declaration_order() {
        let text = generate_to_string(&packet_header(), &BTreeSet::new());

        let apid = text.find("std::memcpy(cursor, &this->apid").expect("apid emitted");
        let length = text.find("std::memcpy(cursor, &this->length").expect("length emitted");
        let flags = text.find("std::memcpy(cursor, &this->flags").expect("flags emitted");
        assert!(apid < length && length < flags, "byte order follows field order");
    }

    #[test]
    fn serialize_and_deserialize_are_exact_mirrors() {
        let structure = packet_header();
        let text = generate_to_string(&structure, &BTreeSet::new());

        // Split the unit into the two bodies
        let deserialize_at = text.find("::deserialize").expect("deserialize present");
        let (serialize_body, deserialize_body) = text.split_at(deserialize_at);

        for field in &structure.fields {
            let write = format!(
                "std::memcpy(cursor, &this->{0}, sizeof(this->{0}));",
                field.name
            );
            let read = format!(
                "std::memcpy(&this->{0}, cursor, sizeof(this->{0}));",
                field.name
            );
            let advance = format!("cursor += sizeof(this->{});", field.name);

            assert!(serialize_body.contains(&write), "serialize writes {}", field.name);
            assert!(deserialize_body.contains(&read), "deserialize reads {}", field.name);
            // Identical stride on both sides
            assert!(serialize_body.contains(&advance));
            assert!(deserialize_body.contains(&advance));
        }

        // Same number of cursor advances on both sides: the layouts agree
        let advances = |body: &str| body.matches("cursor += sizeof").count();
        assert_eq!(advances(serialize_body), advances(deserialize_body));
    }

    #[test]
    fn nested_structures_delegate_instead_of_memcpy() {
        let telemetry = Structure::new("Telemetry")
            .with_methods(vec![
                Method::new("serialize", "void (char *&) const"),
                Method::new("deserialize", "void (char *&)"),
            ])
            .with_fields(vec![
                Field::new("header", "PacketHeader"),
                Field::new("payload_crc", "uint32_t"),
            ]);
        let nested: BTreeSet<String> = ["PacketHeader".to_string()].into();

        let text = generate_to_string(&telemetry, &nested);

        assert!(text.contains("this->header.serialize(cursor);"));
        assert!(text.contains("this->header.deserialize(cursor);"));
        // The nested field is never copied bytewise
        assert!(!text.contains("std::memcpy(cursor, &this->header"));
        assert!(!text.contains("std::memcpy(&this->header"));
        // The scalar neighbour still is
        assert!(text.contains("std::memcpy(cursor, &this->payload_crc"));
    }

    #[test]
    fn regeneration_is_byte_identical() {
        let structure = packet_header();
        let first = generate_to_string(&structure, &BTreeSet::new());
        let second = generate_to_string(&structure, &BTreeSet::new());
        assert_eq!(first, second);
    }

    #[test]
    fn custom_markers_name_the_emitted_methods() {
        let mut target = GenTarget::default();
        target.serialize_marker =
            sergen_gen_config::MarkerMethod::new("pack", "void (char *&) const");
        target.deserialize_marker =
            sergen_gen_config::MarkerMethod::new("unpack", "void (char *&)");

        let record = Structure::new("Record")
            .with_fields(vec![Field::new("id", "uint64_t"), Field::new("inner", "Detail")]);
        let nested: BTreeSet<String> = ["Detail".to_string()].into();

        let mut out = Vec::new();
        generate_serialization_methods(&mut out, &record, &target, &nested)
            .expect("writing to a Vec cannot fail");
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("void Record::pack(char *& cursor) const"));
        assert!(text.contains("void Record::unpack(char *& cursor)"));
        // Delegation follows the marker names too
        assert!(text.contains("this->inner.pack(cursor);"));
        assert!(text.contains("this->inner.unpack(cursor);"));
    }

    #[test]
    fn banner_is_deterministic() {
        let mut first = Vec::new();
        let mut second = Vec::new();
        generate_unit_banner(&mut first, "telemetry").unwrap();
        generate_unit_banner(&mut second, "telemetry").unwrap();
        assert_eq!(first, second);
        assert!(String::from_utf8(first).unwrap().contains("telemetry"));
    }

    #[test]
    fn sink_failure_is_propagated() {
        struct FailingSink;
        impl Write for FailingSink {
            fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::BrokenPipe, "sink closed"))
            }
            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        let result = generate_serialization_methods(
            &mut FailingSink,
            &packet_header(),
            &GenTarget::default(),
            &BTreeSet::new(),
        );
        assert!(result.is_err(), "sink errors must not be swallowed");
    }
}
