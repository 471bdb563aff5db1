use std::error::Error;

use qrgrid::{compute_penalty, ECLevel, MaskPattern, QRBuilder, Version};

fn main() -> Result<(), Box<dyn Error>> {
    let data = "Hello, World!🌎";
    let qr = QRBuilder::new(data.as_bytes())
        .version(Version::new(3)?)        // QR version (size) - if not provided, finds smallest version to fit data
        .ec_level(ECLevel::H)             // Error correction level - if not provided, defaults to ECLevel::M
        .mask(MaskPattern::new(1)?)       // Mask pattern - if not provided, finds best mask based on penalty score
        .build()?;

    for row in qr.to_bools() {
        let line = row.iter().map(|&dark| if dark { '#' } else { '.' }).collect::<String>();
        println!("{line}");
    }

    println!("{}", qr.metadata());
    println!("Penalty: {:?}", compute_penalty(&qr));
    Ok(())
}
