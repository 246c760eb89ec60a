use canonical::{parse, DestinationSet, PlatformConfig};

fn main() {
    let cfg = PlatformConfig::default();
    let inputs: Vec<String> = std::env::args().skip(1).collect();
    let inputs = if inputs.is_empty() {
        vec![
            "/https:/youtu.be/dQw4w9WgXcQ?si=share".to_string(),
            "/shorts/abc123".to_string(),
            "/playlist?list=PL1&index=3".to_string(),
        ]
    } else {
        inputs
    };

    for raw in inputs {
        let reference = parse(&raw);
        let set = DestinationSet::build(&reference, &cfg);
        println!("{raw}");
        println!("  kind:    {}", reference.kind());
        println!("  web:     {}", set.web);
        println!("  ios:     {}", set.ios_scheme);
        println!("  android: {}", set.android_intent);
        println!();
    }
}
