/*!
 * Translation of summaries after they are produced.
 *
 * - `overlay`: applies the external translator to the active result or a
 *   stored history entry
 */

pub mod overlay;

pub use self::overlay::TranslationOverlay;
