/// Determines what happens to the values still in an array when the array is dropped.
///
/// By default, the array will drop its values when it is dropped.
///
/// # Examples
///
/// ```
/// use growable_array::{DropPolicy, GrowableArray};
///
/// // The drop policy is set at array creation time.
/// let mut array = GrowableArray::<u32>::builder()
///     .drop_policy(DropPolicy::MustNotDropItems)
///     .build();
///
/// array.push(1);
///
/// // The array must be emptied before it goes out of scope.
/// array.clear();
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[non_exhaustive]
pub enum DropPolicy {
    /// The array will drop its values when the array is dropped. This is the default.
    #[default]
    MayDropItems,

    /// The array will panic if it still contains values when it is dropped.
    ///
    /// This may be valuable if the values must be handed off somewhere before they are
    /// released, making a silent drop a logic error.
    MustNotDropItems,
}
