use crate::app_state::State;

impl State {
    /// Uploads the raster to the GPU if it changed since the last frame.
    pub fn update(&mut self) {
        if !self.canvas.take_dirty() {
            return;
        }

        let (width, height) = self.canvas_texture.size;
        self.gpu.queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &self.canvas_texture.texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            self.canvas.as_raw(),
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(width * 4),
                rows_per_image: Some(height),
            },
            wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
        );
    }

    pub fn needs_redraw(&self) -> bool {
        self.canvas.is_dirty()
    }
}
