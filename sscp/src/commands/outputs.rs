// sscp-rs/sscp/src/commands/outputs.rs

use crate::constants::{CMD_EXTERNAL_LED_COLORS, CMD_OUTPUTS, CMD_OUTPUT_RGB};
use crate::context::{Coupler, Secure};
use crate::types::CommandHeader;
use crate::Result;

impl Coupler<Secure> {
    /// Drive the LED and the buzzer. Durations are in reader-defined
    /// ticks; 0 means off.
    pub fn outputs(&mut self, led_color: u8, led_duration: u8, buzzer_duration: u8) -> Result<()> {
        let data = [led_color, led_duration, buzzer_duration];
        self.exchange(CommandHeader::new(CMD_OUTPUTS), &data)?;
        Ok(())
    }

    /// Drive the RGB LED with a 24-bit color (0xRRGGBB)
    pub fn outputs_rgb(
        &mut self,
        color: u32,
        led_duration: u8,
        buzzer_duration: u8,
    ) -> Result<()> {
        let data = [
            (color >> 16) as u8,
            (color >> 8) as u8,
            color as u8,
            led_duration,
            buzzer_duration,
        ];
        self.exchange(CommandHeader::new(CMD_OUTPUT_RGB), &data)?;
        Ok(())
    }

    /// Configure the three external LED colors (each 0xRRGGBB)
    pub fn external_led_colors(&mut self, first: u32, second: u32, third: u32) -> Result<()> {
        let mut data = [0u8; 9];
        for (chunk, color) in data.chunks_exact_mut(3).zip([first, second, third]) {
            chunk[0] = (color >> 16) as u8;
            chunk[1] = (color >> 8) as u8;
            chunk[2] = color as u8;
        }
        self.exchange(CommandHeader::new(CMD_EXTERNAL_LED_COLORS), &data)?;
        Ok(())
    }
}
