use std::error::Error;

use qrgrid::QRBuilder;

fn main() -> Result<(), Box<dyn Error>> {
    // Simplest usage - provide only data, all other settings are automatically chosen
    let qr = QRBuilder::new(b"Hello, World!").build()?;

    // Two characters per module keeps the symbol roughly square in a terminal
    for row in qr.to_bools() {
        let line = row.iter().map(|&dark| if dark { "##" } else { "  " }).collect::<String>();
        println!("{line}");
    }

    println!("{}", qr.metadata());
    Ok(())
}
