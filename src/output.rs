//! Image output.
//!
//! The renderer produces a linear-light f32 RGB buffer; this module writes
//! it out as:
//!
//! - **PPM (P3)** — plain-text, square-root gamma, the classic path-tracer
//!   output format
//! - **PNG** — 8-bit with the sRGB transfer curve
//! - **EXR** — 32-bit float, linear, no transform
//! - **TEV** — live view in a running TEV instance over TCP
//!
//! PPM writing fails fast with an `io::Error`; PNG/EXR/TEV log and carry on
//! since a viewer hiccup should not waste a finished render.

use exr::prelude::*;
use image::{ImageBuffer, Rgb};
use log::{debug, info, warn};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::net::TcpStream;
use tev_client::{PacketCreateImage, PacketUpdateImage, TevClient};

/// Write a linear f32 image as a plain-text PPM (P3) stream.
///
/// Header: `P3`, `<width> <height>`, `255`. Then one `R G B` triplet per
/// pixel, row-major from the top scanline. Channels get a square-root gamma
/// transform, are clamped to [0, 0.999], and scaled by 256.
pub fn write_image_as_ppm<W: Write>(
    image: &ImageBuffer<Rgb<f32>, Vec<f32>>,
    out: &mut W,
) -> io::Result<()> {
    writeln!(out, "P3")?;
    writeln!(out, "{} {}", image.width(), image.height())?;
    writeln!(out, "255")?;

    let to_channel = |linear: f32| -> u32 {
        // sqrt is gamma 2, the transform the PPM pipeline expects.
        let gamma = linear.max(0.0).sqrt();
        (256.0 * gamma.clamp(0.0, 0.999)) as u32
    };

    for pixel in image.pixels() {
        writeln!(
            out,
            "{} {} {}",
            to_channel(pixel[0]),
            to_channel(pixel[1]),
            to_channel(pixel[2])
        )?;
    }

    Ok(())
}

/// Save a linear f32 image to a PPM file.
///
/// Unlike the PNG/EXR savers this propagates the error: the PPM path is the
/// primary output and a failed save must abort the run.
pub fn save_image_as_ppm(
    image: &ImageBuffer<Rgb<f32>, Vec<f32>>,
    output_path: &str,
) -> io::Result<()> {
    let file = File::create(output_path)?;
    let mut writer = BufWriter::new(file);
    write_image_as_ppm(image, &mut writer)?;
    writer.flush()?;
    info!("Image saved as {}", output_path);
    Ok(())
}

/// Save a linear f32 image as an 8-bit PNG with sRGB gamma.
pub fn save_image_as_png(
    image: &ImageBuffer<Rgb<f32>, Vec<f32>>,
    output_path: &str,
    width: u32,
    height: u32,
) {
    // sRGB transfer curve with its linear segment near black.
    let linear_to_gamma = |linear: f32| -> f32 {
        if linear <= 0.0 {
            0.0
        } else if linear <= 0.0031308 {
            12.92 * linear
        } else {
            1.055 * linear.powf(1.0 / 2.4) - 0.055
        }
    };

    let u8_image: ImageBuffer<Rgb<u8>, Vec<u8>> = ImageBuffer::from_fn(width, height, |x, y| {
        let pixel = image.get_pixel(x, y);
        Rgb([
            (linear_to_gamma(pixel[0].clamp(0.0, 1.0)) * 255.0) as u8,
            (linear_to_gamma(pixel[1].clamp(0.0, 1.0)) * 255.0) as u8,
            (linear_to_gamma(pixel[2].clamp(0.0, 1.0)) * 255.0) as u8,
        ])
    });

    match u8_image.save(output_path) {
        Ok(_) => info!("Image saved as {}", output_path),
        Err(e) => warn!("Failed to save image: {}", e),
    }
}

/// Save a linear f32 image as a 32-bit float EXR, no tone mapping.
pub fn save_image_as_exr(
    image: &ImageBuffer<Rgb<f32>, Vec<f32>>,
    output_path: &str,
    width: u32,
    height: u32,
) {
    let pixels = image
        .pixels()
        .map(|rgb| (rgb[0], rgb[1], rgb[2]))
        .collect::<Vec<(f32, f32, f32)>>();

    let result = write_rgb_file(output_path, width as usize, height as usize, |x, y| {
        pixels[y * (width as usize) + x]
    });

    match result {
        Ok(_) => info!("HDR image saved as EXR: {}", output_path),
        Err(e) => warn!("Failed to save EXR image: {}", e),
    }
}

/// Send a linear f32 image to a running TEV instance for live viewing.
///
/// TEV wants planar channel data (RRR...GGG...BBB...), so the interleaved
/// buffer is re-laid-out before transmission. Connection or protocol
/// failures are logged and otherwise ignored.
pub fn send_image_to_tev(
    image: &ImageBuffer<Rgb<f32>, Vec<f32>>,
    tev_address: &str,
    width: u32,
    height: u32,
) {
    let tev_address = if tev_address.contains(':') {
        tev_address.to_string()
    } else {
        format!("{}:14158", tev_address)
    };

    debug!("Connecting to TEV at {}", tev_address);
    let stream = match TcpStream::connect(&tev_address) {
        Ok(stream) => stream,
        Err(e) => {
            warn!("Failed to connect to TEV on {}: {}", tev_address, e);
            return;
        }
    };
    if let Err(e) = stream.set_nodelay(true) {
        debug!("Failed to set TCP_NODELAY: {}", e);
    }
    let mut client = TevClient::wrap(stream);

    let create_packet = PacketCreateImage {
        image_name: "lumina_output",
        width,
        height,
        channel_names: &["R", "G", "B"],
        grab_focus: true,
    };
    if let Err(e) = client.send(create_packet) {
        warn!("Failed to create image in TEV: {}", e);
        return;
    }

    let pixel_count = (width * height) as usize;
    let mut rgb_data = Vec::with_capacity(pixel_count * 3);
    for channel in 0..3 {
        for pixel in image.pixels() {
            rgb_data.push(pixel[channel]);
        }
    }

    let update_packet = PacketUpdateImage {
        image_name: "lumina_output",
        grab_focus: false,
        channel_names: &["R", "G", "B"],
        x: 0,
        y: 0,
        width,
        height,
        channel_offsets: &[0, pixel_count as u64, 2 * pixel_count as u64],
        channel_strides: &[1, 1, 1],
        data: &rgb_data,
    };
    match client.send(update_packet) {
        Ok(_) => info!("Image sent to TEV at {}", tev_address),
        Err(e) => warn!("Failed to send image data to TEV: {}", e),
    }
}
