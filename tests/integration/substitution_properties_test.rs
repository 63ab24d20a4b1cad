//! Property tests for variable resolution and block parsing.

use http_block::models::Payload;
use http_block::parser::parse_block;
use http_block::variables::{resolve, VariableTable};
use proptest::prelude::*;

fn name() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,8}"
}

fn value() -> impl Strategy<Value = String> {
    "[A-Za-z0-9._-]{1,16}"
}

proptest! {
    #[test]
    fn local_value_appears_in_url_and_header(name in name(), value in value()) {
        let declaration = format!("# :{} = {}", name, value);
        let request_line = format!("GET http://example.test/:{}", name);
        let header_line = format!("X-Value: :{}", name);
        let block = [declaration.as_str(), request_line.as_str(), header_line.as_str()];

        let variables = resolve::<&str, _>(&[], &block);
        let request = parse_block(&block, &variables).unwrap();

        prop_assert_eq!(request.url, format!("http://example.test/{}", value));
        prop_assert_eq!(&request.headers["X-Value"], &value);
    }

    #[test]
    fn global_position_does_not_matter(name in name(), value in value(), before in any::<bool>()) {
        let declaration = format!("# ${} = {}", name, value);
        let request_line = format!("GET http://${}/path", name);

        let document: Vec<&str> = if before {
            vec![declaration.as_str(), "", request_line.as_str()]
        } else {
            vec![request_line.as_str(), "", declaration.as_str()]
        };
        let block = [request_line.as_str()];

        let request = parse_block(&block, &resolve(&document, &block)).unwrap();
        prop_assert_eq!(request.url, format!("http://{}/path", value));
    }

    #[test]
    fn unused_declarations_are_inert(name in name(), value in value(), path in "[a-z]{1,10}") {
        let declaration = format!("# :zz{} = {}", name, value);
        let request_line = format!("GET http://example.test/{}", path);

        let with = [declaration.as_str(), request_line.as_str(), "Accept: */*"];
        let without = [request_line.as_str(), "Accept: */*"];

        let a = parse_block(&with, &resolve::<&str, _>(&[], &with)).unwrap();
        let b = parse_block(&without, &resolve::<&str, _>(&[], &without)).unwrap();

        prop_assert_eq!(a.url, b.url);
        prop_assert_eq!(a.headers, b.headers);
    }

    #[test]
    fn substitution_without_tokens_is_identity(text in "[^:$]{0,40}") {
        let mut table = VariableTable::new();
        table.insert(":a", "x");
        table.insert("$b", "y");

        prop_assert_eq!(table.substitute(&text), text);
    }

    #[test]
    fn lines_with_equals_become_form_fields(pairs in prop::collection::vec((name(), value()), 1..6)) {
        let request_line = "POST http://example.test/post".to_string();
        let body: Vec<String> = pairs.iter().map(|(k, v)| format!("{}={}", k, v)).collect();

        let mut block = vec![request_line];
        block.extend(body);

        let request = parse_block(&block, &VariableTable::new()).unwrap();
        match request.payload {
            Payload::Form(form) => {
                prop_assert!(form.attachments.is_empty());

                // The last occurrence of a key wins.
                let mut expected = std::collections::HashMap::new();
                for (key, value) in &pairs {
                    expected.insert(key.clone(), value.clone());
                }
                prop_assert_eq!(form.fields.len(), expected.len());
                for (key, value) in &expected {
                    prop_assert_eq!(&form.fields[key], value);
                }
            }
            other => prop_assert!(false, "expected form, got {:?}", other),
        }
    }
}
