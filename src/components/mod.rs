//! UI Components
//!
//! Pages and the reusable pieces they share.

mod cart_view;
mod checkout;
mod directory;
mod floating_cart;
mod google_sign_in;
mod login_form;
mod nav_bar;
mod order_history;
mod product_list;
mod profile;
mod quantity_stepper;
mod shared_cart;
mod shop_analysis;
mod signup_form;
mod split_table;
mod theme_toggle;
mod toast_stack;
mod wallet;

pub use cart_view::CartPage;
pub use checkout::CheckoutPage;
pub use directory::DirectoryPage;
pub use floating_cart::FloatingCart;
pub use google_sign_in::GoogleSignIn;
pub use login_form::LoginPage;
pub use nav_bar::NavBar;
pub use order_history::OrderHistoryPage;
pub use product_list::ShopPage;
pub use profile::ProfilePage;
pub use quantity_stepper::QuantityStepper;
pub use shared_cart::SharedCartPage;
pub use shop_analysis::ShopAnalysisPage;
pub use signup_form::SignupPage;
pub use split_table::SplitTable;
pub use theme_toggle::ThemeToggle;
pub use toast_stack::ToastStack;
pub use wallet::WalletPage;
