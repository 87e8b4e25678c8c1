/// A trait for random sources that return random integers.
///
/// This abstraction allows you to plug in a real random source or a mocked
/// random source in tests. Generators draw one `u32` per identifier and
/// spread it over the 8-bit and 24-bit random fields.
///
/// # Example
/// ```
/// use bizid::RandSource;
///
/// struct FixedRand;
/// impl RandSource<u32> for FixedRand {
///     fn rand(&self) -> u32 {
///         0xDEAD_BEEF
///     }
/// }
///
/// assert_eq!(FixedRand.rand(), 0xDEAD_BEEF);
/// ```
pub trait RandSource<T> {
    /// Returns a random integer.
    fn rand(&self) -> T;
}
