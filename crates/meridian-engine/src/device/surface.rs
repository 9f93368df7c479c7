use super::SurfaceErrorAction;

/// First format whose sRGB-ness matches `prefer_srgb`, else whatever comes first.
pub(super) fn choose_surface_format(
    caps: &wgpu::SurfaceCapabilities,
    prefer_srgb: bool,
) -> Option<wgpu::TextureFormat> {
    pick_format(&caps.formats, prefer_srgb)
}

fn pick_format(formats: &[wgpu::TextureFormat], prefer_srgb: bool) -> Option<wgpu::TextureFormat> {
    formats
        .iter()
        .copied()
        .find(|f| f.is_srgb() == prefer_srgb)
        .or_else(|| formats.first().copied())
}

pub(super) fn choose_alpha_mode(
    caps: &wgpu::SurfaceCapabilities,
    requested: Option<wgpu::CompositeAlphaMode>,
) -> wgpu::CompositeAlphaMode {
    requested
        .filter(|m| caps.alpha_modes.contains(m))
        .or_else(|| caps.alpha_modes.first().copied())
        .unwrap_or(wgpu::CompositeAlphaMode::Auto)
}

pub(super) fn log_surface_error(err: &wgpu::SurfaceError, action: SurfaceErrorAction) {
    match action {
        SurfaceErrorAction::Reconfigured => log::debug!("surface {err:?}, reconfigured"),
        SurfaceErrorAction::SkipFrame => log::trace!("surface {err:?}, frame skipped"),
        SurfaceErrorAction::Fatal => log::error!("surface {err:?}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wgpu::TextureFormat as F;

    #[test]
    fn linear_format_preferred_by_default() {
        let formats = [F::Bgra8UnormSrgb, F::Bgra8Unorm, F::Rgba8Unorm];
        assert_eq!(pick_format(&formats, false), Some(F::Bgra8Unorm));
        assert_eq!(pick_format(&formats, true), Some(F::Bgra8UnormSrgb));
    }

    #[test]
    fn falls_back_to_first_format() {
        assert_eq!(pick_format(&[F::Bgra8UnormSrgb], false), Some(F::Bgra8UnormSrgb));
        assert_eq!(pick_format(&[], false), None);
    }
}
