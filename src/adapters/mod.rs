// Adapters layer: concrete implementations of the domain ports.

pub mod supabase;

pub use supabase::SupabaseClient;
