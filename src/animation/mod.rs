pub(crate) mod anim;
pub(crate) mod ease;
pub(crate) mod playhead;
pub(crate) mod props;
pub(crate) mod timeline;
