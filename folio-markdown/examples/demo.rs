#![allow(clippy::print_stdout, reason = "Demo output")]
use folio_markdown::{ProcessorPreset, create_processor};

const ARTICLE: &str = r#"# Shipping a Rust Service

Deploying is easier than it looks. This post walks through **building**,
*testing* and shipping a small service.

![Architecture](diagrams/arch.png)

## Building

```rust
fn main() {
    println!("Hello, world!");
}
```

## Testing

```made-up-lang
this block has no highlighter
```

## Building

See [the docs](https://doc.rust-lang.org) for more.
"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
  println!("folio-markdown content pipeline");
  println!("===============================\n");

  let pipeline = create_processor(ProcessorPreset::Article);
  let bundle = pipeline.process(ARTICLE);

  println!("Title: {:?}", bundle.title);
  println!("Reading time: {} min", bundle.reading_time_minutes);
  println!("Excerpt: {}\n", bundle.excerpt);

  println!("Outline:");
  for heading in &bundle.outline {
    let indent = "  ".repeat(usize::from(heading.level.saturating_sub(1)));
    println!("{indent}- {} (#{})", heading.title, heading.id);
  }

  println!("\nHTML:\n{}", bundle.html);
  println!("Stylesheet: {} bytes", pipeline.highlight_stylesheet()?.len());
  println!("\nJSON:\n{}", bundle.to_json()?);

  Ok(())
}
