fn main() {
    shop_admin_console::run();
}
