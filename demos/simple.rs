use lingo_core::parse;

fn main() {
    let lingo_json = r#"{
        "metadata": { "version": "1.0", "languages": ["en", "nl"] },
        "phrases": {
            "Hello {name}": { "nl": "Hallo {name}" },
            "Goodbye": { "nl": "Tot ziens {name}" }
        },
        "nouns": {
            "Apple": { "en": ["apple", "apples"], "nl": ["appel", "appels"] }
        }
    }"#;

    let result = parse(lingo_json, "lingo.json");

    for diagnostic in &result.diagnostics {
        match diagnostic.render(lingo_json) {
            Ok(report) => eprintln!("{report}"),
            Err(_) => eprintln!("{}: {}", diagnostic.code.id(), diagnostic.message),
        }
    }

    match result.to_json() {
        Ok(json_output) => println!("Validated lingo.json:\n{json_output}"),
        Err(e) => eprintln!("Failed to serialize result: {e:?}"),
    }
}
