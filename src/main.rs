fn main() {
    quarantine::game::run();
}
