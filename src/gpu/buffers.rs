use toroidal_life::simulation::{Color, CopyBox};
use wgpu::{Buffer, BufferUsages, Device, Queue};

/// Per-cell colour storage buffer plus render parameters for the grid shader
pub struct GridBuffers {
    /// One RGBA colour per cell, row-major
    pub cell_buffer: Buffer,
    /// Uniform buffer for render parameters
    pub render_params_buffer: Buffer,
    pub width: u32,
    pub height: u32,
}

/// Render parameters passed to the fragment shader (32 bytes)
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct RenderParams {
    pub grid_width: u32,
    pub grid_height: u32,
    pub cell_size: f32,
    pub show_grid_lines: u32,
    pub copy_box_origin: [i32; 2],
    pub copy_box_size: u32,
    pub show_copy_box: u32,
}

impl RenderParams {
    pub fn new(
        grid_width: u32,
        grid_height: u32,
        cell_size: u32,
        show_grid_lines: bool,
        copy_box: Option<CopyBox>,
    ) -> Self {
        let to_i32 = |v: i64| v.clamp(i32::MIN as i64, i32::MAX as i64) as i32;
        let (copy_box_origin, copy_box_size) = match copy_box {
            Some(region) => (
                [to_i32(region.x), to_i32(region.y)],
                u32::try_from(region.size).unwrap_or(u32::MAX),
            ),
            None => ([0, 0], 0),
        };
        Self {
            grid_width,
            grid_height,
            cell_size: cell_size as f32,
            show_grid_lines: show_grid_lines as u32,
            copy_box_origin,
            copy_box_size,
            show_copy_box: copy_box.is_some() as u32,
        }
    }
}

impl GridBuffers {
    pub fn new(device: &Device, width: u32, height: u32) -> Self {
        let cell_count = width as usize * height as usize;
        let buffer_size = (cell_count * std::mem::size_of::<Color>()) as u64;

        let cell_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("cell-color-buffer"),
            size: buffer_size,
            usage: BufferUsages::STORAGE | BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let render_params_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("render-params-buffer"),
            size: std::mem::size_of::<RenderParams>() as u64,
            usage: BufferUsages::UNIFORM | BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        Self {
            cell_buffer,
            render_params_buffer,
            width,
            height,
        }
    }

    /// Upload the current generation's display colours
    pub fn upload_cells(&self, queue: &Queue, colors: &[Color]) {
        if colors.len() != self.width as usize * self.height as usize {
            log::warn!(
                "Skipping upload of {} colours to a {}x{} grid buffer",
                colors.len(),
                self.width,
                self.height
            );
            return;
        }
        queue.write_buffer(&self.cell_buffer, 0, bytemuck::cast_slice(colors));
    }

    pub fn update_render_params(
        &self,
        queue: &Queue,
        cell_size: u32,
        show_grid_lines: bool,
        copy_box: Option<CopyBox>,
    ) {
        let params = RenderParams::new(
            self.width,
            self.height,
            cell_size,
            show_grid_lines,
            copy_box,
        );
        queue.write_buffer(&self.render_params_buffer, 0, bytemuck::bytes_of(&params));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_params_size() {
        // uniform buffers must be a multiple of 16 bytes
        assert_eq!(std::mem::size_of::<RenderParams>(), 32);
    }

    #[test]
    fn test_copy_box_params() {
        let hidden = RenderParams::new(10, 8, 4, true, None);
        assert_eq!(hidden.show_copy_box, 0);
        assert_eq!(hidden.show_grid_lines, 1);

        let shown = RenderParams::new(10, 8, 4, false, Some(CopyBox { x: -3, y: 5, size: 8 }));
        assert_eq!(shown.show_copy_box, 1);
        assert_eq!(shown.copy_box_origin, [-3, 5]);
        assert_eq!(shown.copy_box_size, 8);

        let far = RenderParams::new(10, 8, 4, false, Some(CopyBox { x: i64::MAX, y: 0, size: 1 }));
        assert_eq!(far.copy_box_origin[0], i32::MAX);
    }

    #[test]
    fn test_colors_cast_to_vec4() {
        let colors = [Color::RED, Color::TRANSPARENT];
        let floats: &[f32] = bytemuck::cast_slice(&colors);
        assert_eq!(floats, &[1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0]);
    }
}
