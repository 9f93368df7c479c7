/// Initialization parameters for the GPU layer.
#[derive(Debug, Clone)]
pub struct GpuInit {
    /// Prefer an sRGB surface format when available.
    ///
    /// Off by default: `Color` stores sRGB-encoded channels and shaders write
    /// them unchanged, so a non-sRGB target shows hex colors as authored.
    pub prefer_srgb: bool,

    /// FIFO is vsynced and supported everywhere; the hand animation advances
    /// one degree per presented frame, so it should stay vsynced.
    pub present_mode: wgpu::PresentMode,

    /// Alpha mode preference; ignored when the surface does not support it.
    pub alpha_mode: Option<wgpu::CompositeAlphaMode>,

    /// A handful of circles and lines per frame does not need the discrete GPU.
    pub power_preference: wgpu::PowerPreference,

    /// Hint only; support depends on platform/backend.
    pub desired_maximum_frame_latency: u32,
}

impl Default for GpuInit {
    fn default() -> Self {
        Self {
            prefer_srgb: false,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: None,
            power_preference: wgpu::PowerPreference::LowPower,
            desired_maximum_frame_latency: 2,
        }
    }
}
