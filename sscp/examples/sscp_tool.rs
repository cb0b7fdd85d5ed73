#![cfg(feature = "serial")]

//! Interactive demo against a real coupler: authenticate, read the
//! reader identity, then poll for tags and exchange one SELECT APDU.
//!
//! Usage:
//!   cargo run -p sscp --example sscp_tool -- /dev/ttyUSB0 [rs485-address]
//!
//! Set RUST_LOG=sscp=trace to see the frame and exchange hex dumps.

use std::time::Duration;

use sscp::prelude::*;

fn show_statistics(stats: &Statistics) {
    println!("Total SSCP time:       {}s", stats.total_time.as_secs());
    println!("Recovered SSCP errors: {}", stats.total_errors);
    println!("Total bytes sent:      {}", stats.bytes_sent);
    println!("Total bytes received:  {}", stats.bytes_received);
    println!("Number of sessions:    {}", stats.session_count);
    if let Some(session) = stats.session_time {
        println!("Last session time:     {}s", session.as_secs());
    }
    println!("Last session counter:  {}", stats.session_counter);
}

fn main() -> sscp::Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let port = args.next().unwrap_or_else(|| "/dev/ttyUSB0".to_string());
    let address: u8 = args
        .next()
        .and_then(|a| a.parse().ok())
        .unwrap_or(0x00);

    let mut coupler = Coupler::open(&port, Baudrate::B38400)?;
    if address != 0 {
        coupler.select_address(address)?;
    }

    let mut coupler = coupler.authenticate(None)?;
    println!("authenticate OK");

    coupler.outputs(0x02, 0x0A, 0x02)?;

    let info = coupler.get_infos()?;
    println!(
        "get_infos OK, version={:02X}, baudrate={:02X}, address={:02X}, voltage={}mV",
        info.version, info.baudrate_selector, info.address, info.voltage
    );
    println!("serial number: {}", coupler.get_serial_number()?);
    println!("reader type:   {}", coupler.get_reader_type()?);

    // Poll until a tag shows up, talk to it, release, repeat
    loop {
        let tag = coupler.scan_nfc()?;
        match &tag {
            TagInfo::None => continue,
            TagInfo::IsoA { uid, ats } => {
                println!("card present, protocol=ISO A, uid={}", uid.to_hex());
                if let Some(ats) = ats {
                    println!("\tats={}", ats.to_hex());
                }
            }
            TagInfo::IsoB { uid } => {
                println!("card present, protocol=ISO B, uid={}", uid.to_hex());
            }
        }

        coupler.outputs(0x01, 0x0A, 0x02)?;

        // SELECT MF, the classic opening move
        let select_mf = [0x00, 0xA4, 0x04, 0x00, 0x02, 0x3F, 0x00];
        println!("C-APDU={}", bytes_to_hex(&select_mf));
        match coupler.transceive_apdu(&select_mf) {
            Ok(r_apdu) => println!("R-APDU={}", bytes_to_hex(&r_apdu)),
            Err(Error::NfcCardMuteOrRemoved) => println!("card mute or removed"),
            Err(Error::NfcCardCommError) => println!("card communication error"),
            Err(other) => {
                show_statistics(&coupler.statistics());
                return Err(other);
            }
        }

        coupler.outputs(0x02, 0x0A, 0x02)?;
        coupler.release_nfc()?;
        std::thread::sleep(Duration::from_millis(500));
        show_statistics(&coupler.statistics());
    }
}
