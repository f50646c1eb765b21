use wgpu::{
    BindGroup, BindGroupLayout, Buffer, Device, Queue, RenderPipeline, Sampler, Surface,
    SurfaceConfiguration, Texture,
};

use crate::coords::{Device as DeviceSpace, Point2D, WorldBounds};
use crate::error::Result;
use crate::input::Outcome;
use crate::report::ConversionResult;

pub struct GpuContext {
    pub surface: Surface<'static>,
    pub device: Device,
    pub queue: Queue,
    pub config: SurfaceConfiguration,
    pub render_pipeline: RenderPipeline,
    pub texture_bind_group_layout: BindGroupLayout,
    pub sampler: Sampler,
}

/// GPU copy of the pixel raster.
pub struct CanvasTexture {
    pub texture: Texture,
    pub bind_group: BindGroup,
    pub size: (u32, u32),
}

pub struct GeometryBuffers {
    pub vertex: Buffer,
    pub index: Buffer,
    pub count: u32,
}

pub struct InputState {
    /// Pixel under the pointer, `None` while it is outside the window.
    pub cursor: Option<Point2D<DeviceSpace>>,
    /// Last live conversion, shown in the title.
    pub live: Option<ConversionResult>,
    /// Last rejected input, shown until the next preview or successful action.
    pub status: Option<String>,
}

impl InputState {
    /// Remembers what one dispatched event produced.
    pub fn record(&mut self, outcome: &Result<Outcome>) {
        match outcome {
            Ok(Outcome::Preview(result)) => {
                self.live = Some(*result);
                self.status = None;
            }
            Ok(Outcome::Selected(_)) => self.status = None,
            Err(e) => self.status = Some(e.to_string()),
        }
    }

    /// Window title text. Typing wins, then the last error, then the live
    /// conversion, then a hint with the bounds.
    pub fn title(&self, base: &str, typing: &TextInput, bounds: &WorldBounds) -> String {
        if typing.active {
            format!("{base} | World point (x, y): {}_", typing.buffer)
        } else if let Some(status) = &self.status {
            format!("{base} | {status}")
        } else if let Some(live) = &self.live {
            format!("{base} | {}", live.summary())
        } else {
            format!("{base} | {bounds} | W: enter world point")
        }
    }
}

pub struct TextInput {
    pub active: bool,
    pub buffer: String,
}
