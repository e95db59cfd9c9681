use bitflags::bitflags;

bitflags! {
    /// Optional behaviour switches for a flip.
    ///
    /// Urls are protected by default, so `background: url(arrow-left.png)`
    /// keeps its file name. Set these flags when the stylesheet ships mirrored
    /// assets named after their direction.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct FlipOptions: u8 {
        /// Swap `ltr` and `rtl` inside `url(...)`.
        const SWAP_LTR_RTL_IN_URL = 1 << 0;
        /// Swap `left` and `right` inside `url(...)`.
        const SWAP_LEFT_RIGHT_IN_URL = 1 << 1;
    }
}
