fn main() {
    #[cfg(target_os = "windows")]
    {
        let mut res = winres::WindowsResource::new();
        res.set_icon("assets/logo.ico");
        res.set("FileDescription", "Breast Cancer Detection and Prevention");
        res.compile().expect("Failed to compile Windows resources");
    }
}
