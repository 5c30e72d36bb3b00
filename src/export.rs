//! Spec sheets and screenshots.
//!
//! The spec sheet only depends on the three slider values and the material
//! preset. Screenshots read an offscreen frame back from the GPU.

use std::{
    fmt::Write as _,
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use instant::Duration;

use crate::{data_structures::material::MaterialPreset, geometry::layout::Dimensions};

/// Human readable summary of the configured cabinet.
pub fn spec_sheet(dimensions: Dimensions, material: MaterialPreset) -> String {
    let params = material.params();
    let mut sheet = String::from("Cabinet specification\n");
    let _ = writeln!(sheet, "Width:    {:.1}", dimensions.width);
    let _ = writeln!(sheet, "Height:   {:.1}", dimensions.height);
    let _ = writeln!(sheet, "Depth:    {:.1}", dimensions.depth);
    let _ = writeln!(
        sheet,
        "Material: {} (roughness {:.1}, metalness {:.1})",
        material.name(),
        params.roughness,
        params.metalness
    );
    sheet
}

/// `<dir>/<stem>-<local time>.<extension>`
pub fn timestamped_path(dir: &Path, stem: &str, extension: &str) -> PathBuf {
    let stamp = chrono::Local::now().format("%Y%m%d-%H%M%S%.3f");
    dir.join(format!("{}-{}.{}", stem, stamp, extension))
}

pub fn write_spec_sheet(
    dir: &Path,
    dimensions: Dimensions,
    material: MaterialPreset,
) -> anyhow::Result<PathBuf> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Cannot create export directory {}", dir.display()))?;
    let path = timestamped_path(dir, "cabinet-spec", "txt");
    fs::write(&path, spec_sheet(dimensions, material))
        .with_context(|| format!("Cannot write spec sheet to {}", path.display()))?;
    Ok(path)
}

/// Bytes per row of a texture copy, padded to what wgpu requires.
pub fn padded_bytes_per_row(width: u32) -> u32 {
    let align = wgpu::COPY_BYTES_PER_ROW_ALIGNMENT;
    (width * 4).div_ceil(align) * align
}

/// Drops the per-row padding of a texture copy.
pub fn unpad_rows(data: &[u8], width: u32, height: u32, padded_bytes_per_row: u32) -> Vec<u8> {
    let row = (width * 4) as usize;
    data.chunks(padded_bytes_per_row as usize)
        .take(height as usize)
        .flat_map(|padded| &padded[..row])
        .copied()
        .collect()
}

pub fn is_bgra(format: wgpu::TextureFormat) -> bool {
    matches!(
        format,
        wgpu::TextureFormat::Bgra8Unorm | wgpu::TextureFormat::Bgra8UnormSrgb
    )
}

pub fn bgra_to_rgba(pixels: &mut [u8]) {
    pixels.chunks_exact_mut(4).for_each(|px| px.swap(0, 2));
}

/// Copies a colour texture into a CPU image.
///
/// The texture needs `COPY_SRC` usage and a four byte per pixel format.
pub async fn read_texture(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    texture: &wgpu::Texture,
) -> anyhow::Result<image::RgbaImage> {
    let (width, height) = (texture.width(), texture.height());
    let padded = padded_bytes_per_row(width);
    let output_buffer = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("Screenshot Buffer"),
        size: (padded * height) as wgpu::BufferAddress,
        usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
        mapped_at_creation: false,
    });

    let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
        label: Some("Screenshot Encoder"),
    });
    encoder.copy_texture_to_buffer(
        wgpu::TexelCopyTextureInfo {
            aspect: wgpu::TextureAspect::All,
            texture,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
        },
        wgpu::TexelCopyBufferInfo {
            buffer: &output_buffer,
            layout: wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(padded),
                rows_per_image: Some(height),
            },
        },
        texture.size(),
    );
    queue.submit(std::iter::once(encoder.finish()));

    let (tx, rx) = futures_intrusive::channel::shared::oneshot_channel();
    let buffer_slice = output_buffer.slice(..);
    buffer_slice.map_async(wgpu::MapMode::Read, move |result| {
        let _ = tx.send(result);
    });
    device
        .poll(wgpu::PollType::Wait {
            submission_index: None,
            timeout: Some(Duration::from_secs(3)),
        })
        .context("The GPU did not finish the screenshot copy")?;
    rx.receive()
        .await
        .context("Screenshot buffer mapping was dropped")?
        .context("Cannot map the screenshot buffer")?;

    let mut pixels = {
        let data = buffer_slice.get_mapped_range();
        unpad_rows(&data, width, height, padded)
    };
    output_buffer.unmap();

    if is_bgra(texture.format()) {
        bgra_to_rgba(&mut pixels);
    }
    image::RgbaImage::from_raw(width, height, pixels)
        .context("Screenshot data does not match the texture size")
}

pub fn save_png(image: &image::RgbaImage, path: &Path) -> anyhow::Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)
            .with_context(|| format!("Cannot create export directory {}", dir.display()))?;
    }
    image
        .save_with_format(path, image::ImageFormat::Png)
        .with_context(|| format!("Cannot write screenshot to {}", path.display()))
}
